// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Causerie - a conversational assistant gateway.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod models;
mod serve;
mod shutdown;

use std::path::PathBuf;

use causerie_config::{CauserieConfig, ConfigError};
use clap::{Parser, Subcommand};

/// Causerie - a conversational assistant gateway.
#[derive(Parser, Debug)]
#[command(name = "causerie", version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the chat server (default).
    Serve,
    /// List models installed on the Ollama server.
    Models {
        /// Output JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Load and validate the configuration, then print a summary.
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<CauserieConfig, Vec<ConfigError>> {
    match path {
        Some(path) => causerie_config::load_and_validate_path(path),
        None => causerie_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            causerie_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Models { json } => models::run_models(&config, json).await,
        Commands::CheckConfig => {
            print!("{}", summarize(&config));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("causerie: {e}");
        std::process::exit(1);
    }
}

/// Human-readable summary printed by `check-config`.
fn summarize(config: &CauserieConfig) -> String {
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    format!(
        "configuration OK\n\
         server:   {}:{} (static: {}, log: {})\n\
         ollama:   {} (default model: {}, timeout: {}s)\n\
         models:   {}\n\
         tools:    weather=yes web_search={} finance={}\n\
         weather:  api key set: {}\n\
         finance:  {} (demo key: {})\n\
         search:   {} (engines: {}, max results: {})\n",
        config.server.host,
        config.server.port,
        config.server.static_dir,
        config.server.log_level,
        config.ollama.base_url,
        config.ollama.default_model,
        config.ollama.request_timeout_secs,
        config.ollama.available_models.join(", "),
        yes_no(config.router.web_search_enabled),
        yes_no(config.router.finance_enabled),
        yes_no(config.weather.api_key.is_some()),
        config.finance.base_url,
        yes_no(config.finance.api_key == "demo"),
        config.search.base_url,
        config.search.engines,
        config.search.max_results,
    )
}
