//! Progressive style refinement over a journal corpus.
//!
//! Works the way a person would learn a voice: a first batch of entries
//! produces an initial style guide, and every later batch lets the model
//! rewrite that guide wholesale against new evidence. Batches are strictly
//! sequential, cancellation is cooperative at batch boundaries, and a run
//! only aborts after repeated consecutive failures.

use std::sync::Arc;

use chrono::Utc;
use penna_core::progress::{emit, ProgressEvent, ProgressSender};
use penna_core::{CachedStyle, CorpusEntry, DocumentStore};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::RefineConfig;
use crate::error::Result;
use crate::prompts;
use penna_llms::CompletionClient;

/// Seed style guide used when the corpus is empty or no batch succeeds.
pub const DEFAULT_STYLE_GUIDE: &str = "\
# Writing style guide

## Core traits
- Conversational, written the way the author speaks
- Mostly short sentences, broken up naturally
- Honest record keeping, no embellishment

## Sentence habits
- Short sentences, roughly 10-20 words each
- Loose punctuation, full grammar not required

## Vocabulary preferences
- Everyday spoken vocabulary
- Avoids overly formal phrasing

## Structural patterns
- Paragraphs follow time or topic
- Blank line between paragraphs
- No structured headings

## Tone and mood
- Natural and unguarded, feelings left visible
- Occasional self-deprecation is fine

## Unique markers
- None identified

## Directives for generating entries
1. Use short sentences with loose breaks
2. Write conversationally, like talking to a future self
3. No emoji or decorative symbols
4. No structured headings
5. Blank line between paragraphs
6. Record honestly, never moralize or summarize
";

/// Fallback one-liner when no bullet qualifies for the brief.
pub const DEFAULT_BRIEF: &str = "Conversational, short sentences, honest record keeping";

/// Result of one `refine` run. Failures degrade rather than panic: the
/// guide is always usable, and every recorded error is surfaced.
#[derive(Debug, Clone)]
pub struct RefineOutcome {
    pub style_guide: String,
    pub brief: String,
    pub iterations_completed: u32,
    pub was_cancelled: bool,
    pub errors: Vec<String>,
    pub corpus_size: usize,
}

impl RefineOutcome {
    fn seeded(corpus_size: usize) -> Self {
        Self {
            style_guide: DEFAULT_STYLE_GUIDE.to_string(),
            brief: DEFAULT_BRIEF.to_string(),
            iterations_completed: 0,
            was_cancelled: false,
            errors: Vec::new(),
            corpus_size,
        }
    }

    /// Human-readable run report for the CLI result panel.
    pub fn report(&self) -> String {
        let mut out = String::new();
        if self.was_cancelled {
            out.push_str("Style analysis cancelled.\n");
        } else if self.errors.len() as u32 >= 3 {
            out.push_str("Style analysis aborted after repeated failures.\n");
        } else {
            out.push_str("Style analysis complete (progressive refinement).\n");
        }
        out.push_str(&format!(
            "\nEntries analyzed: {}\nIterations: {}\n",
            self.corpus_size, self.iterations_completed
        ));
        if !self.errors.is_empty() {
            out.push_str(&format!("\n{} error(s) during analysis:\n", self.errors.len()));
            for e in &self.errors {
                out.push_str(&format!("- {e}\n"));
            }
        }
        out
    }
}

/// Outcome of loading a corpus from the document store.
#[derive(Debug)]
pub struct CorpusLoad {
    pub entries: Vec<CorpusEntry>,
    pub read_errors: Vec<String>,
    pub was_cancelled: bool,
}

/// Batched, cancellable style refinement engine.
pub struct StyleEngine {
    client: Arc<dyn CompletionClient>,
    cancel: CancellationToken,
}

impl StyleEngine {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token a caller holds to request cooperative cancellation.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Enumerate and read the corpus, most recent first, truncated to the
    /// configured size. Read failures are recorded, not fatal; cancellation
    /// is honored between files.
    pub async fn load_corpus(
        &self,
        store: &dyn DocumentStore,
        folder: &str,
        config: &RefineConfig,
        progress: &ProgressSender,
    ) -> Result<CorpusLoad> {
        emit(
            progress,
            ProgressEvent::scanning(format!("Scanning folder: {folder}..."), 5),
        )
        .await;

        let mut docs = store.list_documents(folder).await?;
        docs.sort_by(|a, b| b.modified.cmp(&a.modified));
        if let Some(max) = config.max_entries {
            docs.truncate(max);
        }

        emit(
            progress,
            ProgressEvent::reading(format!("Found {} entries, reading...", docs.len()), 10)
                .with_details(format!("{} entries found", docs.len())),
        )
        .await;

        let total = docs.len();
        let mut entries = Vec::with_capacity(total);
        let mut read_errors = Vec::new();

        for (i, doc) in docs.iter().enumerate() {
            if self.cancel.is_cancelled() {
                let percent = if total == 0 {
                    10
                } else {
                    (i * 50 / total) as u8
                };
                emit(
                    progress,
                    ProgressEvent::cancelled("Analysis cancelled", percent)
                        .with_details(format!("cancelled after reading {i}/{total} entries")),
                )
                .await;
                return Ok(CorpusLoad {
                    entries,
                    read_errors,
                    was_cancelled: true,
                });
            }

            match store.read_document(&doc.id).await {
                Ok(text) => entries.push(CorpusEntry::new(&doc.id, text)),
                Err(e) => {
                    warn!(id = %doc.id, error = %e, "failed to read entry");
                    read_errors.push(doc.id.clone());
                }
            }

            let percent = 10 + ((i + 1) * 15 / total.max(1)) as u8;
            emit(
                progress,
                ProgressEvent::reading(format!("Reading ({}/{})...", i + 1, total), percent),
            )
            .await;
        }

        Ok(CorpusLoad {
            entries,
            read_errors,
            was_cancelled: false,
        })
    }

    /// Run progressive refinement over an already-loaded corpus.
    pub async fn refine(
        &self,
        corpus: &[CorpusEntry],
        config: &RefineConfig,
        progress: &ProgressSender,
    ) -> RefineOutcome {
        if corpus.is_empty() {
            emit(
                progress,
                ProgressEvent::complete("No entries found, using the default style"),
            )
            .await;
            return RefineOutcome::seeded(0);
        }

        let batch_size = config.batch_size.max(1);
        let total_iterations = corpus.len().div_ceil(batch_size);
        let mut guide = String::new();
        let mut iterations: u32 = 0;
        let mut errors: Vec<String> = Vec::new();
        let mut consecutive_failures: u32 = 0;
        let mut last_percent: u8 = 30;

        info!(
            corpus = corpus.len(),
            batches = total_iterations,
            "starting progressive style refinement"
        );
        emit(
            progress,
            ProgressEvent::analyzing("Starting progressive style refinement...", 30)
                .with_details(format!("{total_iterations} passes over the corpus")),
        )
        .await;

        let batches: Vec<&[CorpusEntry]> = corpus.chunks(batch_size).collect();
        for (batch_idx, batch) in batches.iter().enumerate() {
            if self.cancel.is_cancelled() {
                emit(
                    progress,
                    ProgressEvent::cancelled("Analysis cancelled", last_percent)
                        .with_details(format!("cancelled after {iterations} iterations")),
                )
                .await;
                return self.finish(guide, iterations, true, errors, corpus.len());
            }

            let iteration = batch_idx as u32 + 1;
            let messages = if guide.is_empty() {
                prompts::bootstrap(batch)
            } else {
                prompts::update(&guide, batch)
            };

            match self.client.complete(&messages).await {
                Ok(doc) => {
                    guide = doc;
                    consecutive_failures = 0;
                }
                Err(e) => {
                    let msg = format!("iteration {iteration} failed: {e}");
                    warn!("{msg}");
                    errors.push(msg);
                    consecutive_failures += 1;
                    if consecutive_failures >= config.max_consecutive_failures {
                        iterations = iteration;
                        emit(
                            progress,
                            ProgressEvent::error("Analysis aborted after repeated failures", last_percent)
                                .with_details(format!(
                                    "{consecutive_failures} consecutive failures: {}",
                                    errors.join("; ")
                                )),
                        )
                        .await;
                        return self.finish(guide, iterations, false, errors, corpus.len());
                    }
                }
            }

            iterations = iteration;
            let percent = 30 + batch_percent(iteration as usize, total_iterations);
            last_percent = percent;
            emit(
                progress,
                ProgressEvent::analyzing(
                    format!("Pass {iteration}/{total_iterations} done"),
                    percent,
                )
                .with_details(format!(
                    "batch: {}",
                    batch.iter().map(|e| e.id.as_str()).collect::<Vec<_>>().join(", ")
                )),
            )
            .await;

            // Yield between batches so a cancellation request is seen promptly.
            if batch_idx + 1 < batches.len() {
                tokio::time::sleep(config.inter_batch_delay).await;
            }
        }

        // A cancel that lands during the last batch still counts as cancelled.
        if self.cancel.is_cancelled() {
            emit(
                progress,
                ProgressEvent::cancelled("Analysis cancelled", last_percent)
                    .with_details(format!("cancelled after {iterations} iterations")),
            )
            .await;
            return self.finish(guide, iterations, true, errors, corpus.len());
        }

        emit(
            progress,
            ProgressEvent::complete("Analysis complete")
                .with_details(format!("{iterations} iterations, final style guide produced")),
        )
        .await;

        self.finish(guide, iterations, false, errors, corpus.len())
    }

    fn finish(
        &self,
        guide: String,
        iterations: u32,
        was_cancelled: bool,
        errors: Vec<String>,
        corpus_size: usize,
    ) -> RefineOutcome {
        let guide = if guide.is_empty() {
            DEFAULT_STYLE_GUIDE.to_string()
        } else {
            guide
        };
        let brief = extract_brief(&guide);
        RefineOutcome {
            style_guide: guide,
            brief,
            iterations_completed: iterations,
            was_cancelled,
            errors,
            corpus_size,
        }
    }

    /// Load the corpus and refine in one go. The shape callers actually use.
    pub async fn analyze_folder(
        &self,
        store: &dyn DocumentStore,
        folder: &str,
        config: &RefineConfig,
        progress: &ProgressSender,
    ) -> Result<RefineOutcome> {
        let load = self.load_corpus(store, folder, config, progress).await?;
        if load.was_cancelled {
            let mut outcome = RefineOutcome::seeded(load.entries.len());
            outcome.was_cancelled = true;
            outcome.errors = load.read_errors;
            return Ok(outcome);
        }
        let mut outcome = self.refine(&load.entries, config, progress).await;
        outcome
            .errors
            .extend(load.read_errors.into_iter().map(|id| format!("could not read {id}")));
        Ok(outcome)
    }
}

/// Reuse a cached style when analyzed within the freshness window, otherwise
/// re-run refinement over the folder.
pub async fn ensure_style(
    engine: &StyleEngine,
    store: &dyn DocumentStore,
    folder: &str,
    cached: Option<CachedStyle>,
    config: &RefineConfig,
    progress: &ProgressSender,
) -> Result<CachedStyle> {
    if let Some(style) = cached {
        if style.is_fresh(Utc::now()) {
            return Ok(style);
        }
    }
    let outcome = engine.analyze_folder(store, folder, config, progress).await?;
    Ok(CachedStyle::new(outcome.brief, outcome.style_guide))
}

/// Share of the 60-point analysis window completed after `done` of `total`
/// batches, rounded to the nearest point.
fn batch_percent(done: usize, total: usize) -> u8 {
    ((done * 60 + total / 2) / total.max(1)) as u8
}

/// Best-effort one-line projection of the guide: the first 3-5 short bullet
/// lines before a blank line, headings skipped.
pub fn extract_brief(guide: &str) -> String {
    let mut features: Vec<&str> = Vec::new();

    for line in guide.lines() {
        if line.starts_with("## ") {
            continue;
        }
        if let Some(rest) = line.strip_prefix("- ") {
            if features.len() < 5 {
                let feature = rest.trim();
                let len = feature.chars().count();
                if len > 5 && len < 60 {
                    features.push(feature);
                }
            }
        }
        if features.len() >= 3 && line.trim().is_empty() {
            break;
        }
    }

    if features.is_empty() {
        DEFAULT_BRIEF.to_string()
    } else {
        features.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use penna_llms::{ChatMessage, LlmError};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    /// Scripted model: pops one canned result per call.
    struct ScriptedClient {
        script: Mutex<VecDeque<std::result::Result<String, String>>>,
        calls: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<std::result::Result<String, String>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn ok_n(n: usize) -> Arc<Self> {
            Self::new((0..n).map(|i| Ok(format!("guide v{}", i + 1))).collect())
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(&self, messages: &[ChatMessage]) -> penna_llms::Result<String> {
            self.calls.lock().unwrap().push(messages.to_vec());
            match self.script.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(msg)) => Err(LlmError::MalformedResponse(msg)),
                None => Err(LlmError::MalformedResponse("script exhausted".to_string())),
            }
        }
    }

    fn corpus(n: usize) -> Vec<CorpusEntry> {
        (0..n)
            .map(|i| CorpusEntry::new(format!("entry-{i}.md"), format!("day {i} text")))
            .collect()
    }

    fn quick_config() -> RefineConfig {
        RefineConfig::default().with_inter_batch_delay(std::time::Duration::from_millis(1))
    }

    fn collector() -> (ProgressSender, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel(256);
        (Some(tx), rx)
    }

    fn drain(rx: &mut mpsc::Receiver<ProgressEvent>) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        while let Ok(e) = rx.try_recv() {
            events.push(e);
        }
        events
    }

    #[tokio::test]
    async fn test_empty_corpus_returns_default() {
        let client = ScriptedClient::ok_n(0);
        let engine = StyleEngine::new(client.clone());
        let outcome = engine.refine(&[], &quick_config(), &None).await;

        assert_eq!(outcome.iterations_completed, 0);
        assert_eq!(outcome.style_guide, DEFAULT_STYLE_GUIDE);
        assert!(!outcome.was_cancelled);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_iterations_equal_ceil_of_corpus_over_batch() {
        let client = ScriptedClient::ok_n(3);
        let engine = StyleEngine::new(client.clone());
        let (tx, mut rx) = collector();

        // 12 documents, batch size 5 -> 3 iterations (5, 5, 2).
        let outcome = engine.refine(&corpus(12), &quick_config(), &tx).await;

        assert_eq!(outcome.iterations_completed, 3);
        assert_eq!(outcome.style_guide, "guide v3");
        assert!(outcome.errors.is_empty());
        assert!(!outcome.was_cancelled);
        assert_eq!(client.call_count(), 3);

        drop(tx);
        let events = drain(&mut rx);
        let complete: Vec<_> = events
            .iter()
            .filter(|e| e.stage == penna_core::ProgressStage::Complete)
            .collect();
        assert_eq!(complete.len(), 1);
        assert_eq!(complete[0].percent, 100);
        // 100 only arrives after the last analyzing event.
        let last_analyzing = events
            .iter()
            .rposition(|e| e.stage == penna_core::ProgressStage::Analyzing)
            .unwrap();
        let complete_pos = events
            .iter()
            .position(|e| e.stage == penna_core::ProgressStage::Complete)
            .unwrap();
        assert!(complete_pos > last_analyzing);
    }

    #[tokio::test]
    async fn test_progress_is_monotonic() {
        let client = ScriptedClient::ok_n(4);
        let engine = StyleEngine::new(client);
        let (tx, mut rx) = collector();

        engine.refine(&corpus(20), &quick_config(), &tx).await;
        drop(tx);

        let events = drain(&mut rx);
        let mut last = 0;
        for event in events {
            assert!(event.percent >= last, "progress went backwards");
            last = event.percent;
        }
        assert_eq!(last, 100);
    }

    #[tokio::test]
    async fn test_first_call_bootstraps_later_calls_update() {
        let client = ScriptedClient::ok_n(2);
        let engine = StyleEngine::new(client.clone());

        engine.refine(&corpus(7), &quick_config(), &None).await;

        let calls = client.calls.lock().unwrap();
        assert!(calls[0][0].content.contains("produce a detailed"));
        assert!(calls[1][0].content.contains("update and refine"));
        // The update prompt carries the previous guide verbatim.
        assert!(calls[1][1].content.contains("guide v1"));
    }

    #[tokio::test]
    async fn test_cancellation_before_batch_k() {
        let client = ScriptedClient::ok_n(4);
        let engine = StyleEngine::new(client.clone());
        let cancel = engine.cancel_token();

        // Cancel after the first batch completes: delay is long enough that
        // the token trips during the inter-batch pause.
        let config = RefineConfig::default()
            .with_inter_batch_delay(std::time::Duration::from_millis(50));
        let corpus = corpus(20);
        let handle = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                cancel.cancel();
            })
        };

        let outcome = engine.refine(&corpus, &config, &None).await;
        handle.await.unwrap();

        assert!(outcome.was_cancelled);
        assert_eq!(outcome.iterations_completed, 1);
        // The returned document is the one produced by batch 1.
        assert_eq!(outcome.style_guide, "guide v1");
    }

    #[tokio::test]
    async fn test_cancel_during_final_batch_is_reported() {
        // Trips the token from inside the model call, so the only chance to
        // notice is the re-check after the loop.
        struct CancellingClient {
            cancel: CancellationToken,
        }

        #[async_trait]
        impl CompletionClient for CancellingClient {
            async fn complete(&self, _messages: &[ChatMessage]) -> penna_llms::Result<String> {
                self.cancel.cancel();
                Ok("guide from final batch".to_string())
            }
        }

        let cancel = CancellationToken::new();
        let engine = StyleEngine::new(Arc::new(CancellingClient {
            cancel: cancel.clone(),
        }))
        .with_cancel(cancel);

        // 5 docs, batch 5 -> a single batch.
        let outcome = engine.refine(&corpus(5), &quick_config(), &None).await;

        assert!(outcome.was_cancelled);
        assert_eq!(outcome.iterations_completed, 1);
        assert_eq!(outcome.style_guide, "guide from final batch");
    }

    #[test]
    fn test_batch_percent_rounds_to_nearest() {
        // 60 / 7 = 8.57... -> 9, not the floored 8.
        assert_eq!(batch_percent(1, 7), 9);
        assert_eq!(batch_percent(3, 7), 26);
        assert_eq!(batch_percent(7, 7), 60);
        assert_eq!(batch_percent(1, 8), 8);
        assert_eq!(batch_percent(3, 3), 60);
    }

    #[tokio::test]
    async fn test_cancellation_before_first_batch_returns_default() {
        let client = ScriptedClient::ok_n(4);
        let engine = StyleEngine::new(client.clone());
        engine.cancel_token().cancel();

        let outcome = engine.refine(&corpus(10), &quick_config(), &None).await;

        assert!(outcome.was_cancelled);
        assert_eq!(outcome.iterations_completed, 0);
        assert_eq!(outcome.style_guide, DEFAULT_STYLE_GUIDE);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_single_failure_keeps_prior_guide_and_continues() {
        let client = ScriptedClient::new(vec![
            Ok("guide v1".to_string()),
            Err("boom".to_string()),
            Ok("guide v3".to_string()),
        ]);
        let engine = StyleEngine::new(client);

        let outcome = engine.refine(&corpus(12), &quick_config(), &None).await;

        assert_eq!(outcome.iterations_completed, 3);
        assert_eq!(outcome.style_guide, "guide v3");
        assert_eq!(outcome.errors.len(), 1);
        assert!(!outcome.was_cancelled);
    }

    #[tokio::test]
    async fn test_three_consecutive_failures_abort() {
        let client = ScriptedClient::new(vec![
            Ok("guide v1".to_string()),
            Err("a".to_string()),
            Err("b".to_string()),
            Err("c".to_string()),
            Ok("never reached".to_string()),
        ]);
        let engine = StyleEngine::new(client.clone());

        // 30 docs, batch 5 -> 6 batches; abort fires on the 4th.
        let outcome = engine.refine(&corpus(30), &quick_config(), &None).await;

        assert!(!outcome.was_cancelled);
        assert_eq!(outcome.errors.len(), 3);
        assert_eq!(outcome.style_guide, "guide v1");
        assert_eq!(client.call_count(), 4);
    }

    #[tokio::test]
    async fn test_success_resets_consecutive_failure_count() {
        let client = ScriptedClient::new(vec![
            Err("a".to_string()),
            Err("b".to_string()),
            Ok("guide".to_string()),
            Err("c".to_string()),
            Err("d".to_string()),
            Ok("final guide".to_string()),
        ]);
        let engine = StyleEngine::new(client);

        let outcome = engine.refine(&corpus(30), &quick_config(), &None).await;

        assert_eq!(outcome.iterations_completed, 6);
        assert_eq!(outcome.style_guide, "final guide");
        assert_eq!(outcome.errors.len(), 4);
        assert!(!outcome.was_cancelled);
    }

    #[tokio::test]
    async fn test_all_failures_fall_back_to_default_guide() {
        let client = ScriptedClient::new(vec![
            Err("a".to_string()),
            Err("b".to_string()),
            Err("c".to_string()),
        ]);
        let engine = StyleEngine::new(client);

        let outcome = engine.refine(&corpus(30), &quick_config(), &None).await;

        assert_eq!(outcome.style_guide, DEFAULT_STYLE_GUIDE);
        assert_eq!(outcome.brief, DEFAULT_BRIEF);
    }

    #[test]
    fn test_extract_brief_collects_short_bullets() {
        let guide = "\
# Guide

## Core traits
- Short sentences everywhere
- Dry humor when tired
- Aa

## Sentence habits
- Starts entries mid-thought

- Never reached after blank line
";
        let brief = extract_brief(guide);
        assert_eq!(
            brief,
            "Short sentences everywhere; Dry humor when tired; Starts entries mid-thought"
        );
    }

    #[test]
    fn test_extract_brief_fallback() {
        assert_eq!(extract_brief("no bullets here"), DEFAULT_BRIEF);
    }

    #[test]
    fn test_default_guide_brief_is_its_bullets() {
        let brief = extract_brief(DEFAULT_STYLE_GUIDE);
        assert!(brief.contains("Conversational"));
    }

    #[tokio::test]
    async fn test_load_corpus_prefers_recent_markdown() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("older.md"), "an older entry").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not markdown").unwrap();
        // Distinct mtimes so recency ordering is observable.
        std::thread::sleep(std::time::Duration::from_millis(20));
        std::fs::write(dir.path().join("newer.md"), "the newest entry").unwrap();

        let engine = StyleEngine::new(ScriptedClient::ok_n(0));
        let store = penna_core::FsDocumentStore::new(dir.path());

        let config = RefineConfig::default().with_max_entries(1);
        let load = engine.load_corpus(&store, "", &config, &None).await.unwrap();
        assert_eq!(load.entries.len(), 1);
        assert_eq!(load.entries[0].id, "newer.md");
        assert_eq!(load.entries[0].text, "the newest entry");
        assert!(load.read_errors.is_empty());
        assert!(!load.was_cancelled);

        let config = RefineConfig::default();
        let load = engine.load_corpus(&store, "", &config, &None).await.unwrap();
        let ids: Vec<_> = load.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["newer.md", "older.md"]);
    }
}
