//! Command dispatch.

pub mod analyze;
pub mod chat;
pub mod config;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use penna_llms::{Gateway, GatewayConfig, ProviderKind};

use crate::cli::{Cli, Command};
use crate::settings::{self, Settings};

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze {
            folder,
            max,
            batch_size,
            provider,
            model,
        } => analyze::handle(folder, max, batch_size, provider, model).await,
        Command::Chat {
            folder,
            rounds,
            provider,
            model,
        } => chat::handle(folder, rounds, provider, model).await,
        Command::Config { action } => config::handle(action).await,
    }
}

/// Build the model gateway from settings plus command-line overrides.
/// Fails up front when no credential is available, with a hint naming the
/// variable to set.
pub fn build_gateway(
    settings: &Settings,
    provider: Option<&str>,
    model: Option<&str>,
) -> Result<(Arc<Gateway>, ProviderKind)> {
    let kind = settings.provider_kind(provider)?;
    let key = settings::resolve_api_key(kind).ok_or_else(|| {
        let var = match kind {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            _ => "OPENAI_API_KEY",
        };
        anyhow!("no API key for {kind}; set {var} (e.g. in ~/.penna/env)")
    })?;

    let mut config = GatewayConfig::for_provider(kind, key);
    if let Some(m) = model.or(settings.model.as_deref()) {
        config = config.with_model(m);
    }
    if let Some(endpoint) = settings.endpoint.as_deref() {
        config = config.with_endpoint(endpoint);
    }
    if let Some(endpoint) = std::env::var("PENNA_ENDPOINT").ok().filter(|e| !e.is_empty()) {
        config = config.with_endpoint(endpoint);
    }

    Ok((Arc::new(Gateway::new(config)?), kind))
}
