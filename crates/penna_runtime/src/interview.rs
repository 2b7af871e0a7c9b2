//! Multi-round interview session with checkpoint/resume.
//!
//! One session owns its record and the persistence path: the record is
//! written after every turn-mutating event, survives question failures and
//! restarts, and is cleared only on successful synthesis-and-save or an
//! explicit discard.

use std::sync::Arc;

use penna_core::{InterviewTurn, SessionRecord, SessionStore};
use penna_llms::CompletionClient;
use tracing::{info, warn};

use crate::config::InterviewConfig;
use crate::error::{Result, RuntimeError};
use crate::prompts::{self, CORE_DELIMITER, DIARY_DELIMITER};

/// Automatic retries after an incomplete synthesis result.
const MAX_SYNTHESIS_RETRIES: u32 = 2;
/// Minimum body length accepted by the completeness gate.
const MIN_BODY_CHARS: usize = 50;

/// Conversation controller states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// A question request is in flight or has failed retryably.
    Asking,
    AwaitingAnswer { question: String },
    OfferingFinish { notice: FinishNotice },
    Synthesizing,
    Done,
}

/// Escalating wording for the wrap-up offers at rounds N, 2N and 4N.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishNotice {
    Gentle,
    Pointed,
    Final,
}

impl FinishNotice {
    pub fn message(&self, rounds: u32) -> String {
        match self {
            FinishNotice::Gentle => format!(
                "That covers the basics ({rounds} answers so far). Want to wrap \
                 up the entry here, or keep going?"
            ),
            FinishNotice::Pointed => format!(
                "We've talked through {rounds} answers now - that's plenty of \
                 material. Ready to wrap up?"
            ),
            FinishNotice::Final => format!(
                "{rounds} answers is a lot! I'll stop asking after this - keep \
                 going as long as you like, and finish whenever you're ready."
            ),
        }
    }
}

/// What happens after an answer is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    NextQuestion(String),
    OfferFinish(FinishNotice),
}

/// A synthesized entry plus the verbatim core sentence used for naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    pub body: String,
    pub core_sentence: String,
    /// False when the completeness gate was still failing after all retries.
    pub complete: bool,
    pub attempts: u32,
}

pub struct InterviewSession {
    client: Arc<dyn CompletionClient>,
    store: Arc<dyn SessionStore>,
    config: InterviewConfig,
    record: SessionRecord,
    state: SessionState,
}

impl InterviewSession {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        store: Arc<dyn SessionStore>,
        config: InterviewConfig,
    ) -> Self {
        Self {
            client,
            store,
            config,
            record: SessionRecord::new(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn rounds_completed(&self) -> u32 {
        self.record.rounds_completed
    }

    /// Load any persisted record. Returns true when a non-empty session can
    /// be resumed; a round counter persisted mid-question is normalized back
    /// to the turn count so the pending question is simply re-asked.
    pub async fn load(&mut self) -> Result<bool> {
        if let Some(mut record) = self.store.load().await? {
            record.normalize();
            let resumable = !record.is_empty();
            self.record = record;
            Ok(resumable)
        } else {
            Ok(false)
        }
    }

    /// Begin a fresh session: configuration gate, then the first question.
    pub async fn start(&mut self) -> Result<String> {
        self.check_config()?;
        self.record = SessionRecord::new();
        self.store.clear().await?;
        self.ask_question().await
    }

    /// Continue a previously loaded session with the next question.
    pub async fn resume(&mut self) -> Result<String> {
        self.check_config()?;
        info!(
            turns = self.record.turns.len(),
            "resuming interview session"
        );
        self.ask_question().await
    }

    /// Throw away the stored session and revert to idle.
    pub async fn discard(&mut self) -> Result<()> {
        self.store.clear().await?;
        self.record = SessionRecord::new();
        self.state = SessionState::Idle;
        Ok(())
    }

    fn check_config(&self) -> Result<()> {
        if !self.config.has_credential {
            return Err(RuntimeError::Config(
                "no model credential configured - set an API key first".to_string(),
            ));
        }
        if self.config.style_brief.trim().is_empty() {
            return Err(RuntimeError::Config(
                "no style description available - run style analysis first".to_string(),
            ));
        }
        Ok(())
    }

    /// Request the next question. The round counter is incremented and
    /// persisted before the question is surfaced, so a crash never loses
    /// it; on failure the counter does not move and the call is retryable.
    pub async fn ask_question(&mut self) -> Result<String> {
        self.state = SessionState::Asking;

        let next_round = self.record.rounds_completed + 1;
        let answers = self.record.answers();
        let messages = prompts::question(
            &self.config.style_brief,
            next_round,
            self.config.base_rounds,
            &answers,
        );

        let question = self.client.complete(&messages).await?;
        let question = question.trim().to_string();

        self.record.begin_round();
        self.store.save(&self.record).await?;

        self.state = SessionState::AwaitingAnswer {
            question: question.clone(),
        };
        Ok(question)
    }

    /// Record an answer (empty = explicit skip), persist, and either move
    /// straight to the next question or offer to wrap up at a checkpoint.
    pub async fn submit_answer(&mut self, question: &str, answer: &str) -> Result<StepOutcome> {
        self.record.push_turn(InterviewTurn::new(question, answer));
        self.store.save(&self.record).await?;

        if let Some(notice) = self.checkpoint_notice() {
            self.state = SessionState::OfferingFinish { notice };
            return Ok(StepOutcome::OfferFinish(notice));
        }

        let next = self.ask_question().await?;
        Ok(StepOutcome::NextQuestion(next))
    }

    /// User declined a wrap-up offer; identical to a normal continuation.
    pub async fn continue_session(&mut self) -> Result<String> {
        self.ask_question().await
    }

    /// The wrap-up offer fires exactly at rounds N, 2N and 4N. Rounds only
    /// grow, so each checkpoint fires at most once; past 4N the user
    /// continues freely and must finish explicitly.
    fn checkpoint_notice(&self) -> Option<FinishNotice> {
        let n = self.config.base_rounds;
        let round = self.record.rounds_completed;
        if round == n {
            Some(FinishNotice::Gentle)
        } else if round == n * 2 {
            Some(FinishNotice::Pointed)
        } else if round == n * 4 {
            Some(FinishNotice::Final)
        } else {
            None
        }
    }

    /// Synthesize the entry from the accumulated turns. Incomplete-looking
    /// output triggers up to two automatic retries; the last result is
    /// returned either way rather than discarded.
    pub async fn synthesize(&mut self) -> Result<SynthesisResult> {
        if self.record.turns.is_empty() {
            return Err(RuntimeError::NoContent);
        }
        self.state = SessionState::Synthesizing;

        let messages = prompts::synthesis(&self.config.style_guide, &self.record.turns);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let response = self.client.complete(&messages).await?;
            let (body, core_sentence) = parse_synthesis(&response);
            let complete = body_is_complete(&body);
            let result = SynthesisResult {
                body,
                core_sentence,
                complete,
                attempts,
            };
            // Retries exhausted: hand back the degraded result.
            if complete || attempts > MAX_SYNTHESIS_RETRIES {
                return Ok(result);
            }
            warn!(attempt = attempts, "synthesis output looks truncated, retrying");
        }
    }

    /// The entry was saved by the caller: clear the record and finish.
    pub async fn finalize(&mut self) -> Result<()> {
        self.store.clear().await?;
        self.record = SessionRecord::new();
        self.state = SessionState::Done;
        Ok(())
    }

    /// Persist and fall back to idle (e.g. on shutdown mid-session).
    pub async fn suspend(&mut self) -> Result<()> {
        if !self.record.is_empty() {
            self.store.save(&self.record).await?;
        }
        self.state = SessionState::Idle;
        Ok(())
    }
}

/// Split a delimited response into (body, core sentence). Delimiters missing
/// is an expected branch: the whole response becomes the body and the core
/// sentence stays empty.
pub fn parse_synthesis(response: &str) -> (String, String) {
    let Some(diary_start) = response.find(DIARY_DELIMITER) else {
        return (response.trim().to_string(), String::new());
    };
    let after_diary = &response[diary_start + DIARY_DELIMITER.len()..];

    let Some(core_start) = after_diary.find(CORE_DELIMITER) else {
        return (response.trim().to_string(), String::new());
    };
    let body = after_diary[..core_start].trim();
    let core = after_diary[core_start + CORE_DELIMITER.len()..].trim();

    if body.is_empty() {
        (response.trim().to_string(), String::new())
    } else {
        (body.to_string(), core.to_string())
    }
}

/// Completeness gate: reject obviously truncated bodies.
pub fn body_is_complete(body: &str) -> bool {
    let trimmed = body.trim();
    if trimmed.chars().count() < MIN_BODY_CHARS {
        return false;
    }
    if !trimmed
        .chars()
        .any(|c| matches!(c, '.' | '?' | '!' | '。' | '？' | '！'))
    {
        return false;
    }
    if trimmed.ends_with("...") || trimmed.ends_with('…') {
        return false;
    }
    // A trailing connective reads as a mid-phrase cut.
    if trimmed.ends_with([',', '，', ';', '；', '-', '—']) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use penna_core::error::Result as CoreResult;
    use penna_llms::{ChatMessage, LlmError};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedClient {
        script: Mutex<VecDeque<std::result::Result<String, String>>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<std::result::Result<String, String>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
            })
        }

        /// Endless question generator.
        fn questions() -> Arc<Self> {
            Self::new(Vec::new())
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(&self, _messages: &[ChatMessage]) -> penna_llms::Result<String> {
            match self.script.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(msg)) => Err(LlmError::Protocol {
                    status: 500,
                    body: msg,
                }),
                None => Ok("What happened today?".to_string()),
            }
        }
    }

    /// In-memory session store.
    #[derive(Default)]
    struct MemoryStore {
        record: Mutex<Option<SessionRecord>>,
        saves: Mutex<u32>,
    }

    #[async_trait]
    impl SessionStore for MemoryStore {
        async fn save(&self, record: &SessionRecord) -> CoreResult<()> {
            *self.record.lock().unwrap() = Some(record.clone());
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }

        async fn load(&self) -> CoreResult<Option<SessionRecord>> {
            Ok(self.record.lock().unwrap().clone())
        }

        async fn clear(&self) -> CoreResult<()> {
            *self.record.lock().unwrap() = None;
            Ok(())
        }
    }

    fn config() -> InterviewConfig {
        InterviewConfig::new("terse, wry", "# Guide").with_base_rounds(5)
    }

    fn session_with(client: Arc<ScriptedClient>) -> (InterviewSession, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let session = InterviewSession::new(client, store.clone(), config());
        (session, store)
    }

    const COMPLETE_BODY: &str = "Long day at work, but the walk home made up for it. \
        The rain finally stopped and the streets smelled clean.";

    fn delimited(body: &str, core: &str) -> String {
        format!("---DIARY---\n{body}\n---CORE---\n{core}")
    }

    /// Drive question/answer cycles, answering every question and pressing
    /// "continue" through any finish offer encountered on the way.
    async fn answer_rounds(session: &mut InterviewSession, count: u32) -> Vec<FinishNotice> {
        let mut notices = Vec::new();
        for i in 0..count {
            let question = match session.state().clone() {
                SessionState::AwaitingAnswer { question } => question,
                _ => session.continue_session().await.unwrap(),
            };
            match session
                .submit_answer(&question, &format!("answer {i}"))
                .await
                .unwrap()
            {
                StepOutcome::NextQuestion(_) => {}
                StepOutcome::OfferFinish(notice) => notices.push(notice),
            }
        }
        notices
    }

    #[tokio::test]
    async fn test_start_then_one_answer_gives_round_one() {
        let (mut session, store) = session_with(ScriptedClient::questions());
        let question = session.start().await.unwrap();
        assert_eq!(session.rounds_completed(), 1);

        session.submit_answer(&question, "fine").await.unwrap();
        assert_eq!(session.record().turns.len(), 1);
        assert_eq!(session.rounds_completed(), 2); // next question already asked

        // Every mutation was persisted.
        assert!(*store.saves.lock().unwrap() >= 3);
    }

    #[tokio::test]
    async fn test_empty_style_halts_before_any_call() {
        let store = Arc::new(MemoryStore::default());
        let mut session = InterviewSession::new(
            ScriptedClient::questions(),
            store,
            InterviewConfig::new("", "guide"),
        );
        let err = session.start().await.unwrap_err();
        assert!(matches!(err, RuntimeError::Config(_)));
        assert_eq!(session.rounds_completed(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_halts() {
        let store = Arc::new(MemoryStore::default());
        let mut session = InterviewSession::new(
            ScriptedClient::questions(),
            store,
            config().with_credential(false),
        );
        assert!(matches!(
            session.start().await.unwrap_err(),
            RuntimeError::Config(_)
        ));
    }

    #[tokio::test]
    async fn test_question_failure_keeps_round_counter() {
        let client = ScriptedClient::new(vec![Err("server error".to_string())]);
        let (mut session, _) = session_with(client);

        let err = session.start().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(session.rounds_completed(), 0);
        assert_eq!(session.state(), &SessionState::Asking);

        // Retry succeeds (script exhausted -> default question).
        let question = session.ask_question().await.unwrap();
        assert!(!question.is_empty());
        assert_eq!(session.rounds_completed(), 1);
    }

    #[tokio::test]
    async fn test_checkpoints_fire_at_n_2n_4n_and_never_after() {
        let (mut session, _) = session_with(ScriptedClient::questions());
        session.start().await.unwrap();

        // Drive through 8N = 40 answered rounds.
        let notices = answer_rounds(&mut session, 40).await;

        assert_eq!(
            notices,
            vec![FinishNotice::Gentle, FinishNotice::Pointed, FinishNotice::Final]
        );
        assert_eq!(session.record().turns.len(), 40);
    }

    #[tokio::test]
    async fn test_checkpoint_wording_escalates() {
        assert!(FinishNotice::Gentle.message(5).contains("keep going"));
        assert!(FinishNotice::Pointed.message(10).contains("plenty"));
        assert!(FinishNotice::Final.message(20).contains("stop asking"));
    }

    #[tokio::test]
    async fn test_continue_after_offer_behaves_normally() {
        let (mut session, _) = session_with(ScriptedClient::questions());
        session.start().await.unwrap();
        let notices = answer_rounds(&mut session, 5).await;
        assert_eq!(notices, vec![FinishNotice::Gentle]);
        assert!(matches!(
            session.state(),
            SessionState::OfferingFinish { .. }
        ));

        let question = session.continue_session().await.unwrap();
        assert!(!question.is_empty());
        assert_eq!(session.rounds_completed(), 6);
    }

    #[tokio::test]
    async fn test_synthesis_with_zero_turns_is_rejected() {
        let (mut session, _) = session_with(ScriptedClient::questions());
        let err = session.synthesize().await.unwrap_err();
        assert!(matches!(err, RuntimeError::NoContent));
    }

    #[tokio::test]
    async fn test_synthesis_happy_path_clears_on_finalize() {
        let client = ScriptedClient::new(vec![
            Ok("Q1".to_string()),
            Ok("Q2".to_string()), // consumed by the auto next question
            Ok(delimited(COMPLETE_BODY, "The rain finally stopped.")),
        ]);
        let (mut session, store) = session_with(client);

        let question = session.start().await.unwrap();
        session.submit_answer(&question, "rainy").await.unwrap();

        let result = session.synthesize().await.unwrap();
        assert!(result.complete);
        assert_eq!(result.attempts, 1);
        assert_eq!(result.core_sentence, "The rain finally stopped.");
        assert!(result.body.contains("walk home"));

        // Record survives until the caller confirms the save.
        assert!(store.record.lock().unwrap().is_some());
        session.finalize().await.unwrap();
        assert!(store.record.lock().unwrap().is_none());
        assert_eq!(session.state(), &SessionState::Done);
    }

    #[tokio::test]
    async fn test_incomplete_synthesis_retries_then_degrades() {
        let truncated = delimited("too short...", "");
        let client = ScriptedClient::new(vec![
            Ok("Q1".to_string()),
            Ok("Q2 ignored".to_string()), // consumed by the auto next question
            Ok(truncated.clone()),
            Ok(truncated.clone()),
            Ok(truncated),
        ]);
        let (mut session, _) = session_with(client);

        let question = session.start().await.unwrap();
        session.submit_answer(&question, "a").await.unwrap();

        let result = session.synthesize().await.unwrap();
        assert!(!result.complete);
        assert_eq!(result.attempts, 3); // initial + 2 retries
        assert_eq!(result.body, "too short...");
    }

    #[tokio::test]
    async fn test_resume_normalizes_pending_round() {
        let store = Arc::new(MemoryStore::default());
        // Simulate a crash after a question was produced but never answered.
        let mut crashed = SessionRecord::new();
        crashed.begin_round();
        crashed.push_turn(InterviewTurn::new("q1", "a1"));
        crashed.begin_round(); // question 2 pending
        store.save(&crashed).await.unwrap();

        let mut session =
            InterviewSession::new(ScriptedClient::questions(), store.clone(), config());
        assert!(session.load().await.unwrap());
        assert_eq!(session.rounds_completed(), 1);
        assert_eq!(session.record().turns.len(), 1);

        let question = session.resume().await.unwrap();
        assert!(!question.is_empty());
        assert_eq!(session.rounds_completed(), 2);
    }

    #[tokio::test]
    async fn test_discard_clears_store() {
        let (mut session, store) = session_with(ScriptedClient::questions());
        let question = session.start().await.unwrap();
        session.submit_answer(&question, "a").await.unwrap();
        assert!(store.record.lock().unwrap().is_some());

        session.discard().await.unwrap();
        assert!(store.record.lock().unwrap().is_none());
        assert_eq!(session.state(), &SessionState::Idle);
        assert!(!session.load().await.unwrap());
    }

    #[tokio::test]
    async fn test_skip_recorded_as_empty_answer() {
        let (mut session, _) = session_with(ScriptedClient::questions());
        let question = session.start().await.unwrap();
        session.submit_answer(&question, "").await.unwrap();
        assert!(session.record().turns[0].is_skipped());
    }

    #[test]
    fn test_parse_synthesis_happy_path() {
        let (body, core) = parse_synthesis(&delimited("the body text", "core line"));
        assert_eq!(body, "the body text");
        assert_eq!(core, "core line");
    }

    #[test]
    fn test_parse_synthesis_missing_delimiters_falls_back() {
        let (body, core) = parse_synthesis("  just prose, no markers  ");
        assert_eq!(body, "just prose, no markers");
        assert_eq!(core, "");
    }

    #[test]
    fn test_parse_synthesis_missing_core_marker_falls_back() {
        let raw = "---DIARY---\nbody without a core marker";
        let (body, core) = parse_synthesis(raw);
        assert_eq!(body, raw.trim());
        assert_eq!(core, "");
    }

    #[test]
    fn test_parse_synthesis_empty_body_falls_back() {
        let raw = delimited("", "core only");
        let (body, core) = parse_synthesis(&raw);
        assert_eq!(body, raw.trim());
        assert_eq!(core, "");
    }

    #[test]
    fn test_completeness_gate() {
        assert!(body_is_complete(COMPLETE_BODY));
        // Too short.
        assert!(!body_is_complete("Short."));
        // No terminal punctuation anywhere.
        assert!(!body_is_complete(&"word ".repeat(20)));
        // Trailing ellipsis.
        assert!(!body_is_complete(&format!("{COMPLETE_BODY} and then…")));
        assert!(!body_is_complete(&format!("{COMPLETE_BODY} and then...")));
        // Mid-phrase cut.
        assert!(!body_is_complete(&format!("{COMPLETE_BODY} and,")));
        // CJK terminal punctuation counts.
        let cjk = format!("{}。", "今天下了一整天的雨我们在屋里呆着喝了茶聊了很久关于夏天的计划".repeat(2));
        assert!(body_is_complete(&cjk));
    }
}
