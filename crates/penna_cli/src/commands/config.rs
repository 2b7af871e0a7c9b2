//! `penna config` subcommands.

use anyhow::Result;
use chrono::Utc;
use penna_llms::ProviderKind;

use crate::cli::ConfigAction;
use crate::output;
use crate::settings::{self, Settings};

pub async fn handle(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show(),
        ConfigAction::Set { key, value } => set(&key, &value),
        ConfigAction::Test { provider } => test(provider.as_deref()).await,
    }
}

async fn test(provider: Option<&str>) -> Result<()> {
    let settings = Settings::load()?;
    let (gateway, kind) = super::build_gateway(&settings, provider, None)?;

    let spinner = output::spinner(&format!("Testing {kind}..."));
    match gateway.ping().await {
        Ok(()) => {
            output::spinner_success(&spinner, &format!("{kind} is reachable."));
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, &format!("{kind} test failed."));
            Err(e.into())
        }
    }
}

fn show() -> Result<()> {
    let settings = Settings::load()?;

    output::header("Settings");
    let entries = settings.entries();
    let mut table = output::table();
    output::table_header(&mut table, "Key", "Value");
    for (key, value) in &entries {
        output::table_row(&mut table, key, value);
    }
    let items: Vec<(&str, &str)> = entries
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    output::table_print(&table, &items);

    output::header("Credentials");
    for kind in [ProviderKind::OpenAi, ProviderKind::Anthropic] {
        match settings::resolve_api_key(kind) {
            Some(key) => output::kv(kind.as_str(), &settings::mask_key(&key)),
            None => output::kv(kind.as_str(), "(not set)"),
        }
    }

    output::header("Writing style");
    match settings::load_style()? {
        Some(style) if style.is_fresh(Utc::now()) => {
            output::kv("analyzed", &style.analyzed_at.format("%Y-%m-%d %H:%M").to_string());
            output::kv("style", &style.brief);
        }
        Some(style) => {
            output::kv("analyzed", &style.analyzed_at.format("%Y-%m-%d %H:%M").to_string());
            output::warning("Style is stale; run `penna analyze` to refresh it.");
        }
        None => output::dim("No style yet; run `penna analyze <folder>` first."),
    }

    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut settings = Settings::load()?;
    settings.set(key, value)?;
    settings.save()?;
    output::success(&format!("Set {key} = {value}"));
    Ok(())
}
