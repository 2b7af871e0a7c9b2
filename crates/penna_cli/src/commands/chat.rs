//! `penna chat` — the guided journaling conversation.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Utc;
use penna_core::{DocumentStore, FsDocumentStore, JsonFileSessionStore};
use penna_runtime::{
    ensure_style, naming, FinishNotice, InterviewConfig, InterviewSession, RefineConfig,
    RuntimeError, StepOutcome, StyleEngine,
};
use crate::output;
use crate::settings::{self, Settings};

pub async fn handle(
    folder: Option<String>,
    rounds: Option<u32>,
    provider: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let settings = Settings::load()?;
    let (client, _) = super::build_gateway(&settings, provider.as_deref(), model.as_deref())?;

    let journal = folder
        .or_else(|| settings.journal_folder.clone())
        .ok_or_else(|| anyhow!("no journal folder configured; run `penna analyze <folder>` first"))?;
    let store = FsDocumentStore::new(&journal);
    if !store.folder_exists("").await {
        return Err(anyhow!("'{journal}' is not a directory"));
    }

    // Reuse the cached style when fresh; re-analyze the folder otherwise.
    let style = {
        let spinner = output::spinner("Checking writing style...");
        let engine = StyleEngine::new(client.clone());
        let refine_config = RefineConfig::default().with_batch_size(settings.batch_size);
        let cached = settings::load_style()?;
        let was_cached = cached.as_ref().is_some_and(|s| s.is_fresh(Utc::now()));
        let style = ensure_style(&engine, &store, "", cached, &refine_config, &None).await?;
        if was_cached {
            spinner.finish_and_clear();
        } else {
            settings::save_style(&style)?;
            output::spinner_success(&spinner, "Writing style refreshed.");
        }
        style
    };

    let session_store = Arc::new(JsonFileSessionStore::new(
        settings::penna_home()?.join(JsonFileSessionStore::FILE_NAME),
    ));
    let config = InterviewConfig::new(&style.brief, &style.guide)
        .with_base_rounds(rounds.unwrap_or(settings.base_rounds));
    let mut session = InterviewSession::new(client, session_store, config);

    let resumable = session.load().await?;
    let resume = if resumable {
        let answered = session.record().turns.len();
        output::warning(&format!(
            "Found a saved conversation with {answered} answer(s)."
        ));
        let choice = read_line("Resume it? [Y/n] ")?;
        if choice.eq_ignore_ascii_case("n") {
            session.discard().await?;
            false
        } else {
            true
        }
    } else {
        false
    };

    output::header("Let's talk about your day.");
    output::dim("Answer each question, or: /skip, /finish, /quit.");

    let mut question = if resume {
        // Replay the saved exchange so the conversation reads whole.
        for turn in &session.record().turns {
            output::question(&turn.question);
            output::dim(&replay_answer(&turn.answer));
        }
        session.resume().await?
    } else {
        session.start().await?
    };

    loop {
        output::question(&question);
        let answer = read_line("> ")?;

        match answer.as_str() {
            "/quit" => {
                session.suspend().await?;
                output::dim("Conversation saved. Run `penna chat` to pick it back up.");
                return Ok(());
            }
            "/finish" => break,
            _ => {}
        }

        let answer = if answer == "/skip" { String::new() } else { answer };
        match session.submit_answer(&question, &answer).await {
            Ok(StepOutcome::NextQuestion(next)) => question = next,
            Ok(StepOutcome::OfferFinish(notice)) => {
                let answered = session.record().turns.len() as u32;
                output::warning(&notice.message(answered));
                if matches!(notice, FinishNotice::Final) {
                    output::dim("(This is the last reminder.)");
                }
                let choice = read_line("Finish now? [y/N] ")?;
                if choice.eq_ignore_ascii_case("y") {
                    break;
                }
                question = session.continue_session().await?;
            }
            Err(e) => {
                output::dim("Your answers are saved; run `penna chat` to continue.");
                return Err(e.into());
            }
        }
    }

    // Synthesis and save.
    let spinner = output::spinner("Writing your entry...");
    let result = match session.synthesize().await {
        Ok(result) => result,
        Err(RuntimeError::NoContent) => {
            spinner.finish_and_clear();
            output::warning("Nothing was answered, so there is nothing to write.");
            session.discard().await?;
            return Ok(());
        }
        Err(e) => {
            output::spinner_error(&spinner, "Could not write the entry.");
            output::dim("Your answers are saved; run `penna chat` to try again.");
            return Err(e.into());
        }
    };
    output::spinner_success(&spinner, "Entry written.");
    if !result.complete {
        output::warning("The entry may be cut short; saving what we have.");
    }

    output::body(&result.body);

    let file_name = naming::entry_file_name(Utc::now(), &result.core_sentence);
    let path = format!(
        "{}/{}",
        settings.diary_folder.trim_end_matches('/'),
        file_name
    );
    store.write_document(&path, &result.body).await?;
    session.finalize().await?;

    output::success(&format!("Saved to {journal}/{path}"));
    Ok(())
}

/// How a stored answer reads when an earlier conversation is replayed.
fn replay_answer(answer: &str) -> String {
    if answer.is_empty() {
        "(skipped)".to_string()
    } else {
        format!("> {answer}")
    }
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_answer_marks_skips() {
        assert_eq!(replay_answer("slept badly"), "> slept badly");
        assert_eq!(replay_answer(""), "(skipped)");
    }
}
