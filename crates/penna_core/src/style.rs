use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long an analyzed style stays valid before a re-run is required.
pub const STYLE_TTL_DAYS: i64 = 7;

/// Result of a style refinement run, cached between runs.
///
/// `brief` is the one-line projection used inside question prompts; `guide`
/// is the full style-guide document used for synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedStyle {
    pub brief: String,
    pub guide: String,
    pub analyzed_at: DateTime<Utc>,
}

impl CachedStyle {
    pub fn new(brief: impl Into<String>, guide: impl Into<String>) -> Self {
        Self {
            brief: brief.into(),
            guide: guide.into(),
            analyzed_at: Utc::now(),
        }
    }

    /// True when the style was analyzed within the TTL and can be reused.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        !self.brief.is_empty() && now - self.analyzed_at < Duration::days(STYLE_TTL_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_within_a_week() {
        let style = CachedStyle::new("short sentences", "# Guide");
        assert!(style.is_fresh(Utc::now()));
    }

    #[test]
    fn test_stale_after_a_week() {
        let mut style = CachedStyle::new("short sentences", "# Guide");
        style.analyzed_at = Utc::now() - Duration::days(8);
        assert!(!style.is_fresh(Utc::now()));
    }

    #[test]
    fn test_empty_brief_is_never_fresh() {
        let style = CachedStyle::new("", "# Guide");
        assert!(!style.is_fresh(Utc::now()));
    }
}
