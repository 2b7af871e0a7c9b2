//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// Style-aware guided journaling from the terminal
#[derive(Parser)]
#[command(name = "penna", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a journal folder and build the writing-style guide
    Analyze {
        /// Folder containing markdown journal entries
        folder: String,
        /// Cap the number of entries analyzed (most recent first)
        #[arg(long)]
        max: Option<usize>,
        /// Entries summarized per model call
        #[arg(long)]
        batch_size: Option<usize>,
        /// Provider to use (openai, anthropic). Uses settings if not set.
        #[arg(long)]
        provider: Option<String>,
        /// Model to use. Uses the provider default if not set.
        #[arg(long)]
        model: Option<String>,
    },
    /// Start (or resume) a guided journaling conversation
    Chat {
        /// Journal folder root (default: the last analyzed folder)
        #[arg(long)]
        folder: Option<String>,
        /// Base interview length; wrap-up offers come at this round and its
        /// doubles
        #[arg(long)]
        rounds: Option<u32>,
        /// Provider to use (openai, anthropic). Uses settings if not set.
        #[arg(long)]
        provider: Option<String>,
        /// Model to use. Uses the provider default if not set.
        #[arg(long)]
        model: Option<String>,
    },
    /// Configure penna settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current settings and credential status
    Show,
    /// Set a settings key (provider, model, endpoint, journal-folder,
    /// diary-folder, base-rounds, batch-size, max-entries)
    Set {
        /// Settings key
        key: String,
        /// New value ("none" clears optional keys)
        value: String,
    },
    /// Test provider connectivity with a tiny probe request
    Test {
        /// Provider to test (default: the configured one)
        #[arg(long)]
        provider: Option<String>,
    },
}
