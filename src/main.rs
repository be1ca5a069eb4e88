//! # gemini-explorer
//!
//! Lists the Gemini models visible to an API key, tags each with a family and a
//! "recommended" flag, and filters them. Falls back to a built-in catalog when the
//! API errors or returns nothing.
//!
//! ## Modes
//! - Interactive explorer (default)
//! - `list` / `show` for plain text or JSON output
//! - `config`, `set-api-key`, `completions`

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

/// Load the configuration or exit with a user-friendly message (Display, not Debug).
fn load_config_or_exit() -> core::config::Config {
    core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    match args.command {
        Some(Commands::Config) => core::cli::run_config(),
        Some(Commands::SetApiKey { key }) => core::cli::run_set_api_key(key),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            cli::generate(shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
        }
        Some(Commands::List { filters, json }) => {
            let config = load_config_or_exit();
            core::cli::run_list(&config, &filters.to_criteria(), json).await;
        }
        Some(Commands::Show { id }) => {
            let config = load_config_or_exit();
            core::cli::run_show(&config, &id).await;
        }
        None => {
            let config = load_config_or_exit();
            run::launch_tui(config).await?;
        }
    }

    Ok(())
}
