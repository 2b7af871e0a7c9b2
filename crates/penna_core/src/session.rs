use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question/answer pair. An empty answer is an explicit skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewTurn {
    pub question: String,
    pub answer: String,
}

impl InterviewTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn skipped(question: impl Into<String>) -> Self {
        Self::new(question, "")
    }

    pub fn is_skipped(&self) -> bool {
        self.answer.is_empty()
    }
}

/// The single persisted interview state. Written after every turn-mutating
/// event, cleared only on successful synthesis-and-save or explicit discard.
///
/// `rounds_completed` equals `turns.len()` whenever an answer has been
/// recorded; it may lead by one while a question is in flight, because the
/// counter is persisted before the question is shown so a crash never loses
/// it. `normalize()` restores the invariant on resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub turns: Vec<InterviewTurn>,
    pub rounds_completed: u32,
    pub saved_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            rounds_completed: 0,
            saved_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty() && self.rounds_completed == 0
    }

    /// Append an answered turn and refresh the save timestamp.
    pub fn push_turn(&mut self, turn: InterviewTurn) {
        self.turns.push(turn);
        self.saved_at = Utc::now();
    }

    /// Record that a question was successfully produced for the next round.
    pub fn begin_round(&mut self) {
        self.rounds_completed += 1;
        self.saved_at = Utc::now();
    }

    /// Drop a round counter that leads the turn count (question produced but
    /// never answered before a restart). The pending question is re-asked.
    pub fn normalize(&mut self) {
        self.rounds_completed = self.turns.len() as u32;
    }

    /// All recorded answers, in round order. Skips are included as empty
    /// strings so round indices stay aligned.
    pub fn answers(&self) -> Vec<&str> {
        self.turns.iter().map(|t| t.answer.as_str()).collect()
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}
