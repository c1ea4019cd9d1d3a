const MAX_VISIBLE_CHARS: usize = 100;

const SECRET_MARKERS: [&str; 7] = [
    "Bearer ",
    "api_key=",
    "key=",
    "x-goog-api-key: ",
    "X-API-KEY: ",
    "password=",
    "token=",
];

/// Shortens extracted text or prompts for logging and redacts credentials.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let cut = trimmed
            .char_indices()
            .nth(MAX_VISIBLE_CHARS)
            .map_or(trimmed.len(), |(i, _)| i);
        format!("{}... ({total_chars} chars total)", &trimmed[..cut])
    } else {
        trimmed.to_string()
    };

    redact_secrets(&visible).replace('\n', " ")
}

fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();

    for marker in SECRET_MARKERS {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(marker) {
            let value_start = search_from + found + marker.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
                .map_or(result.len(), |i| value_start + i);

            if value_start == value_end || &result[value_start..value_end] == "[REDACTED]" {
                search_from = value_end;
                continue;
            }

            result.replace_range(value_start..value_end, "[REDACTED]");
            search_from = value_start + "[REDACTED]".len();
        }
    }

    result
}
