//! Engine configuration.

use std::time::Duration;

/// Style refinement tuning.
#[derive(Debug, Clone)]
pub struct RefineConfig {
    /// Documents per refinement iteration.
    pub batch_size: usize,
    /// Cap on corpus size after recency sorting (None = all documents).
    pub max_entries: Option<usize>,
    /// Pause between batches so cancellation checks are never starved.
    pub inter_batch_delay: Duration,
    /// Consecutive batch failures that abort the whole run.
    pub max_consecutive_failures: u32,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            max_entries: None,
            inter_batch_delay: Duration::from_millis(500),
            max_consecutive_failures: 3,
        }
    }
}

impl RefineConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    pub fn with_inter_batch_delay(mut self, delay: Duration) -> Self {
        self.inter_batch_delay = delay;
        self
    }
}

/// Interview session tuning.
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    /// Base round count N; finish offers fire at N, 2N and 4N.
    pub base_rounds: u32,
    /// One-line style description used to phrase questions.
    pub style_brief: String,
    /// Full style guide used to phrase the synthesis prompt.
    pub style_guide: String,
    /// Whether a model credential is configured; checked before any call.
    pub has_credential: bool,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            base_rounds: 5,
            style_brief: String::new(),
            style_guide: String::new(),
            has_credential: true,
        }
    }
}

impl InterviewConfig {
    pub fn new(style_brief: impl Into<String>, style_guide: impl Into<String>) -> Self {
        Self {
            style_brief: style_brief.into(),
            style_guide: style_guide.into(),
            ..Self::default()
        }
    }

    pub fn with_base_rounds(mut self, rounds: u32) -> Self {
        self.base_rounds = rounds.max(1);
        self
    }

    pub fn with_credential(mut self, configured: bool) -> Self {
        self.has_credential = configured;
        self
    }
}
