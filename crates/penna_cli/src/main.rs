//! CLI entry point for penna.

mod cli;
mod commands;
mod output;
mod settings;

use clap::Parser;

use crate::cli::Cli;

/// Load configuration env files.
/// Order: 1) ~/.penna/env  2) nearest .env up from the working directory.
fn load_env_files() {
    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".penna").join("env");
        if config_path.exists() {
            let _ = dotenvy::from_path(&config_path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd;
        for _ in 0..32 {
            let env_file = dir.join(".env");
            if env_file.exists() {
                let _ = dotenvy::from_path(&env_file);
                break;
            }
            if let Some(parent) = dir.parent() {
                dir = parent.to_path_buf();
            } else {
                break;
            }
        }
    }
}

/// Tracing goes to stderr so it never mixes with command output.
/// PENNA_LOG overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "penna=debug,warn" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("PENNA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    load_env_files();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    output::init(cli.output);

    if let Err(e) = commands::handle(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
