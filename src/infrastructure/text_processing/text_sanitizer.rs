use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

static HORIZONTAL_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());

static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Cleans PDF and OCR output before it is embedded in a prompt: NFKC
/// normalization, control characters dropped, words split across line ends
/// rejoined, whitespace runs collapsed and at most one blank line kept.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    let joined = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");
    let collapsed = HORIZONTAL_RUNS.replace_all(&joined, " ");

    let trimmed_lines = collapsed
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    BLANK_RUNS
        .replace_all(&trimmed_lines, "\n\n")
        .trim()
        .to_string()
}
