use serde::{Deserialize, Serialize};

/// Character budget applied when a source document is loaded into the corpus.
/// Keeps prompt size bounded regardless of how long individual entries are.
pub const ENTRY_CHAR_BUDGET: usize = 2500;

/// One source document used as style evidence. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub id: String,
    pub text: String,
}

impl CorpusEntry {
    /// Create an entry, truncating the text to the default character budget.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_budget(id, text, ENTRY_CHAR_BUDGET)
    }

    /// Create an entry truncated to an explicit character budget.
    pub fn with_budget(id: impl Into<String>, text: impl Into<String>, budget: usize) -> Self {
        let mut text = text.into();
        truncate_chars(&mut text, budget);
        Self {
            id: id.into(),
            text,
        }
    }
}

/// Truncate a string to at most `budget` characters, on a char boundary.
pub fn truncate_chars(text: &mut String, budget: usize) {
    if let Some((idx, _)) = text.char_indices().nth(budget) {
        text.truncate(idx);
    }
}

/// Borrowing variant of [`truncate_chars`] for prompt assembly.
pub fn clip_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
