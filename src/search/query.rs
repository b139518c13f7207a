//! Normalized search query

/// A non-empty, lowercased search needle.
///
/// Constructing one is the only way to run a match, so an empty or
/// whitespace-only query can never "match everything".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Trim and lowercase `raw`. Returns `None` for empty/whitespace input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring test. Non-Latin text is compared as-is.
    pub fn is_in(&self, haystack: &str) -> bool {
        !haystack.is_empty() && haystack.to_lowercase().contains(&self.needle)
    }
}
