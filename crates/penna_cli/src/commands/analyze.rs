//! `penna analyze` — build the style guide from a journal folder.

use anyhow::{anyhow, Result};
use penna_core::{CachedStyle, DocumentStore, FsDocumentStore};
use penna_runtime::{RefineConfig, StyleEngine};
use tokio::sync::mpsc;

use crate::output;
use crate::settings::{self, Settings};

pub async fn handle(
    folder: String,
    max: Option<usize>,
    batch_size: Option<usize>,
    provider: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let mut settings = Settings::load()?;
    let (client, _) = super::build_gateway(&settings, provider.as_deref(), model.as_deref())?;

    let store = FsDocumentStore::new(&folder);
    if !store.folder_exists("").await {
        return Err(anyhow!("'{folder}' is not a directory"));
    }

    let mut refine_config =
        RefineConfig::default().with_batch_size(batch_size.unwrap_or(settings.batch_size));
    if let Some(max) = max.or(settings.max_entries) {
        refine_config = refine_config.with_max_entries(max);
    }

    let engine = StyleEngine::new(client);
    let cancel = engine.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    output::header(&format!("Analyzing writing style: {folder}"));
    output::dim("Press Ctrl-C to stop; the style from completed batches is kept.");

    // Engine events drive the bar; the channel closing ends the render task.
    let (tx, mut rx) = mpsc::channel(32);
    let bar = output::progress_bar();
    let render_bar = bar.clone();
    let render = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            output::progress(&render_bar, &event);
        }
    });

    let progress = Some(tx);
    let outcome = engine
        .analyze_folder(&store, "", &refine_config, &progress)
        .await?;
    drop(progress);
    let _ = render.await;
    bar.finish_and_clear();

    if outcome.was_cancelled {
        output::warning("Analysis cancelled.");
    }
    print!("{}", outcome.report());
    output::dim(&format!("Style: {}", outcome.brief));

    settings::save_style(&CachedStyle::new(
        outcome.brief.clone(),
        outcome.style_guide.clone(),
    ))?;
    settings.journal_folder = Some(folder);
    settings.save()?;

    output::success("Style guide saved. Start journaling with `penna chat`.");
    Ok(())
}
