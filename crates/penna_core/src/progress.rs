use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Phase of a long-running engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    Scanning,
    Reading,
    Analyzing,
    Complete,
    Error,
    Cancelled,
}

/// Push-based progress record. Percent is non-decreasing within one run,
/// except on cancellation or error where it freezes at the last value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: ProgressStage,
    pub message: String,
    pub percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ProgressEvent {
    pub fn new(stage: ProgressStage, message: impl Into<String>, percent: u8) -> Self {
        Self {
            stage,
            message: message.into(),
            percent: percent.min(100),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn scanning(message: impl Into<String>, percent: u8) -> Self {
        Self::new(ProgressStage::Scanning, message, percent)
    }

    pub fn reading(message: impl Into<String>, percent: u8) -> Self {
        Self::new(ProgressStage::Reading, message, percent)
    }

    pub fn analyzing(message: impl Into<String>, percent: u8) -> Self {
        Self::new(ProgressStage::Analyzing, message, percent)
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(ProgressStage::Complete, message, 100)
    }

    pub fn error(message: impl Into<String>, percent: u8) -> Self {
        Self::new(ProgressStage::Error, message, percent)
    }

    pub fn cancelled(message: impl Into<String>, percent: u8) -> Self {
        Self::new(ProgressStage::Cancelled, message, percent)
    }
}

/// Optional progress sink. Engines send fire-and-forget; a caller that does
/// not care passes `None`, and a dropped receiver is tolerated.
pub type ProgressSender = Option<mpsc::Sender<ProgressEvent>>;

/// Send a progress event if a sink is attached, ignoring channel errors.
pub async fn emit(sink: &ProgressSender, event: ProgressEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(event).await;
    }
}
