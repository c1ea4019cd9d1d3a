#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSnippet {
    pub title: String,
    pub snippet: String,
}

/// Ordered evidence snippets for a single request. Empty when search is
/// disabled or failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchContext {
    snippets: Vec<SearchSnippet>,
}

impl SearchContext {
    pub fn new(snippets: Vec<SearchSnippet>) -> Self {
        Self { snippets }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn snippets(&self) -> &[SearchSnippet] {
        &self.snippets
    }

    /// Renders the snippets as `Source:`/`Content:` pairs separated by blank lines.
    pub fn render(&self) -> String {
        self.snippets
            .iter()
            .map(|s| format!("Source: {}\nContent: {}", s.title, s.snippet))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
