//! penna_runtime — the two engines behind guided journaling.
//!
//! - **refine** — progressive style refinement: batched, cancellable,
//!   fault-tolerant summarization of a journal corpus into a style guide.
//! - **interview** — the multi-round question/answer state machine with
//!   checkpoint/resume and synthesis of the final entry.

pub mod config;
pub mod error;
pub mod interview;
pub mod naming;
pub mod prompts;
pub mod refine;

pub use config::{InterviewConfig, RefineConfig};
pub use error::{Result, RuntimeError};
pub use interview::{
    FinishNotice, InterviewSession, SessionState, StepOutcome, SynthesisResult,
};
pub use refine::{ensure_style, RefineOutcome, StyleEngine};
