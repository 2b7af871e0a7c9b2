//! Persisted CLI settings, style cache and credential lookup.
//!
//! Everything lives under `~/.penna/`: `settings.json` for preferences,
//! `style.json` for the cached style guide, `session.json` for the
//! resumable interview record. API keys are env-only (loaded from
//! `~/.penna/env` or a project `.env` at startup), never written to disk
//! by this module.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use penna_core::CachedStyle;
use penna_llms::ProviderKind;
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.json";
pub const STYLE_FILE: &str = "style.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: String,
    pub model: Option<String>,
    /// Custom endpoint for OpenAI-compatible servers.
    pub endpoint: Option<String>,
    /// Folder of journal entries, remembered from the last analyze run.
    pub journal_folder: Option<String>,
    /// Where finished entries are written, relative to the journal folder.
    pub diary_folder: String,
    pub base_rounds: u32,
    pub batch_size: usize,
    pub max_entries: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: None,
            endpoint: None,
            journal_folder: None,
            diary_folder: "Diary".to_string(),
            base_rounds: 5,
            batch_size: 5,
            max_entries: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = penna_home()?.join(SETTINGS_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("could not read {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("malformed settings file {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = penna_home()?.join(SETTINGS_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("could not write {}", path.display()))?;
        Ok(())
    }

    /// The effective provider after an optional command-line override.
    pub fn provider_kind(&self, flag: Option<&str>) -> Result<ProviderKind> {
        let name = flag.unwrap_or(&self.provider);
        name.parse()
            .map_err(|_| anyhow!("unknown provider '{name}' (expected openai, anthropic or custom)"))
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "provider" => {
                value
                    .parse::<ProviderKind>()
                    .map_err(|_| anyhow!("unknown provider '{value}'"))?;
                self.provider = value.to_lowercase();
            }
            "model" => {
                self.model = optional(value);
            }
            "endpoint" => {
                self.endpoint = optional(value);
            }
            "journal-folder" => {
                self.journal_folder = optional(value);
            }
            "diary-folder" => {
                self.diary_folder = value.to_string();
            }
            "base-rounds" => {
                let rounds: u32 = value.parse().context("base-rounds must be a number")?;
                if rounds == 0 {
                    return Err(anyhow!("base-rounds must be at least 1"));
                }
                self.base_rounds = rounds;
            }
            "batch-size" => {
                let size: usize = value.parse().context("batch-size must be a number")?;
                if size == 0 {
                    return Err(anyhow!("batch-size must be at least 1"));
                }
                self.batch_size = size;
            }
            "max-entries" => {
                self.max_entries = optional(value)
                    .map(|v| v.parse::<usize>().context("max-entries must be a number"))
                    .transpose()?;
            }
            _ => {
                return Err(anyhow!(
                    "unknown key '{key}' (expected provider, model, endpoint, \
                     journal-folder, diary-folder, base-rounds, batch-size or \
                     max-entries)"
                ));
            }
        }
        Ok(())
    }

    /// Key/value pairs for `config show`, in a stable order.
    pub fn entries(&self) -> Vec<(String, String)> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "(not set)".to_string());
        vec![
            ("provider".to_string(), self.provider.clone()),
            ("model".to_string(), opt(&self.model)),
            ("endpoint".to_string(), opt(&self.endpoint)),
            ("journal-folder".to_string(), opt(&self.journal_folder)),
            ("diary-folder".to_string(), self.diary_folder.clone()),
            ("base-rounds".to_string(), self.base_rounds.to_string()),
            ("batch-size".to_string(), self.batch_size.to_string()),
            (
                "max-entries".to_string(),
                self.max_entries
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "(not set)".to_string()),
            ),
        ]
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

/// `~/.penna`, created on first use.
pub fn penna_home() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("could not find home directory"))?;
    let dir = home.join(".penna");
    fs::create_dir_all(&dir)
        .with_context(|| format!("could not create {}", dir.display()))?;
    Ok(dir)
}

pub fn load_style() -> Result<Option<CachedStyle>> {
    let path = penna_home()?.join(STYLE_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("could not read {}", path.display()))?;
    Ok(serde_json::from_str(&raw).ok())
}

pub fn save_style(style: &CachedStyle) -> Result<()> {
    let path = penna_home()?.join(STYLE_FILE);
    let json = serde_json::to_string_pretty(style)?;
    fs::write(&path, json)
        .with_context(|| format!("could not write {}", path.display()))?;
    Ok(())
}

/// Credential lookup: PENNA_API_KEY wins, then the provider's own variable.
pub fn resolve_api_key(provider: ProviderKind) -> Option<String> {
    if let Ok(key) = env::var("PENNA_API_KEY") {
        if !key.trim().is_empty() {
            return Some(key);
        }
    }
    let var = match provider {
        ProviderKind::OpenAi | ProviderKind::Custom => "OPENAI_API_KEY",
        ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
    };
    env::var(var).ok().filter(|k| !k.trim().is_empty())
}

pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
