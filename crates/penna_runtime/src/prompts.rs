//! Prompt builders for both engines.
//!
//! The model does all structural merging of the style guide; these builders
//! only assemble evidence and instructions, clipping each document to keep
//! prompt growth bounded.

use std::fmt::Write as _;

use penna_core::corpus::clip_chars;
use penna_core::{CorpusEntry, InterviewTurn};
use penna_llms::ChatMessage;

/// Per-entry clip inside the bootstrap prompt.
pub const BOOTSTRAP_ENTRY_CLIP: usize = 2000;
/// Per-entry clip inside update prompts (the guide itself takes room).
pub const UPDATE_ENTRY_CLIP: usize = 1800;

pub const DIARY_DELIMITER: &str = "---DIARY---";
pub const CORE_DELIMITER: &str = "---CORE---";

/// First batch: infer a structured style guide from raw samples.
pub fn bootstrap(batch: &[CorpusEntry]) -> Vec<ChatMessage> {
    let system = "You are a writing style analyst. From the journal samples \
        provided, produce a detailed \"style guide\" document.\n\n\
        Requirements:\n\
        1. Read the entries carefully and identify the author's writing habits\n\
        2. Output Markdown with these sections:\n\
           - Core traits (3-5 summarizing sentences)\n\
           - Sentence habits (short or long sentences? how are they broken up?)\n\
           - Vocabulary preferences (colloquial? formal? verbal tics?)\n\
           - Structural patterns (paragraphing, headings, opening and closing habits)\n\
           - Tone and mood (direct? understated? self-deprecating?)\n\
           - Unique markers (expressions only this author uses)\n\
           - Directives for generating entries (writing instructions based on the above)\n\
        3. Be concrete and actionable, never generic";

    let mut user = format!(
        "Analyze the following {} journal entries and produce the style guide:\n\n",
        batch.len()
    );
    for entry in batch {
        let _ = writeln!(
            user,
            "=== {} ===\n{}\n",
            entry.id,
            clip_chars(&entry.text, BOOTSTRAP_ENTRY_CLIP)
        );
    }
    user.push_str("\nOutput the complete style guide document (Markdown):");

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Later batches: rewrite the guide wholesale given old version + new evidence.
pub fn update(current_guide: &str, batch: &[CorpusEntry]) -> Vec<ChatMessage> {
    let system = "You are a writing style analyst. Given an existing style \
        guide and new journal samples, update and refine the understanding \
        of the author's style.\n\n\
        Requirements:\n\
        1. Read the new samples carefully\n\
        2. Compare against the existing guide and decide whether to:\n\
           - add newly observed traits\n\
           - correct inaccurate descriptions\n\
           - merge duplicate observations\n\
           - drop traits the new samples do not support\n\
        3. Output the updated guide in full, keeping the same section format\n\
        4. Stay concrete and actionable";

    let mut user = format!("[Current style guide]\n{current_guide}\n\n[New journal samples]\n");
    for entry in batch {
        let _ = writeln!(
            user,
            "=== {} ===\n{}\n",
            entry.id,
            clip_chars(&entry.text, UPDATE_ENTRY_CLIP)
        );
    }
    user.push_str("\nOutput the updated style guide in full (Markdown):");

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// One interview question, phrased against the style brief and prior answers.
pub fn question(
    style_brief: &str,
    round: u32,
    total_rounds: u32,
    previous_answers: &[&str],
) -> Vec<ChatMessage> {
    let system = format!(
        "You are a journal companion, guiding the user through their day \
         with gentle questions.\n\
         The user's writing style: {style_brief}\n\n\
         Requirements:\n\
         1. Keep questions short and conversational\n\
         2. Avoid vague questions; follow broad openers with a specific direction\n\
         3. Follow up naturally on earlier answers\n\
         4. This is question {round} of {total_rounds}\n\
         5. Ask exactly one question"
    );

    let user = if previous_answers.is_empty() {
        "This is the first question. Open the conversation casually, asking \
         what happened today or how they feel."
            .to_string()
    } else {
        let mut user = String::from("Previous answers:\n");
        for (i, answer) in previous_answers.iter().enumerate() {
            let shown = if answer.is_empty() { "(skipped)" } else { answer };
            let _ = writeln!(user, "{}. {}", i + 1, shown);
        }
        let _ = write!(
            user,
            "\nThis is question {round}. Follow up naturally on the answers \
             above, or open a new topic."
        );
        user
    };

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Full transcript + style guide, demanding the two-part delimited output.
pub fn synthesis(style_guide: &str, turns: &[InterviewTurn]) -> Vec<ChatMessage> {
    let system = format!(
        "You are a journal assistant helping the user turn a conversation \
         into a journal entry.\n\n\
         [The user's writing style]\n{style_guide}\n\n\
         [Output requirements]\n\
         1. Conversational tone, mostly short sentences\n\
         2. No structured headings\n\
         3. No emoji\n\
         4. No bullet lists\n\
         5. Break paragraphs naturally by time or topic\n\
         6. Authentic and unpolished, like the user's own account of the day\n\n\
         [Output format]\n\
         {DIARY_DELIMITER}\n\
         [entry body, paragraphs separated by blank lines]\n\
         {CORE_DELIMITER}\n\
         [the single most important sentence, verbatim from the body]"
    );

    let mut user =
        String::from("Based on the following conversation, write the journal entry:\n\n");
    for turn in turns {
        let answer = if turn.answer.is_empty() {
            "(skipped)"
        } else {
            &turn.answer
        };
        let _ = writeln!(user, "Q: {}\nA: {}\n", turn.question, answer);
    }
    user.push_str(
        "\nOutput only the entry, no commentary. Extract the most important \
         sentence verbatim (not a summary) for the second part.\nFormat:\n",
    );
    let _ = write!(
        user,
        "{DIARY_DELIMITER}\n[entry body]\n{CORE_DELIMITER}\n[core sentence]"
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
