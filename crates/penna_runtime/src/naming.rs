//! Entry file naming from the synthesized core sentence.

use chrono::{DateTime, Utc};

/// Cap on the sanitized core sentence inside a file name.
const MAX_SENTENCE_CHARS: usize = 50;

/// `YYYY-MM-DD <sanitized core sentence>.md`, or `YYYY-MM-DD.md` when the
/// core sentence sanitizes to nothing.
pub fn entry_file_name(now: DateTime<Utc>, core_sentence: &str) -> String {
    let date = now.format("%Y-%m-%d");
    let clean = sanitize_sentence(core_sentence);
    if clean.is_empty() {
        format!("{date}.md")
    } else {
        format!("{date} {clean}.md")
    }
}

fn sanitize_sentence(sentence: &str) -> String {
    let no_illegal: String = sentence
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();

    let collapsed = no_illegal.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '.'));

    trimmed.chars().take(MAX_SENTENCE_CHARS).collect::<String>().trim_end().to_string()
}
