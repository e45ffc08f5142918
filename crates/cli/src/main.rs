//! promptlift CLI — the main entry point.
//!
//! Commands:
//! - `enhance`    — Rewrite a prompt using conversation history
//! - `providers`  — List resolvable providers
//! - `config`     — Show the effective or default configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "promptlift",
    about = "promptlift: context-aware prompt enhancement",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a prompt using the relevant part of a conversation
    Enhance {
        /// The prompt to enhance
        #[arg(short, long)]
        prompt: String,

        /// JSON file holding the conversation history (array of messages)
        #[arg(long)]
        history: Option<PathBuf>,

        /// File whose contents are appended as project context
        #[arg(long)]
        project_context: Option<PathBuf>,

        /// Provider name; defaults to `default_provider` from the config
        #[arg(long, env = "PROMPTLIFT_PROVIDER")]
        provider: Option<String>,
    },

    /// List providers that can be resolved from the configuration
    Providers,

    /// Show the effective configuration (secrets redacted)
    Config {
        /// Print the built-in default configuration instead
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the enhanced prompt
    let filter = default_log_filter(cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Enhance {
            prompt,
            history,
            project_context,
            provider,
        } => {
            commands::enhance::run(commands::enhance::EnhanceArgs {
                prompt,
                history,
                project_context,
                provider,
            })
            .await?
        }
        Commands::Providers => commands::providers::run().await?,
        Commands::Config { default } => commands::config_cmd::run(default).await?,
    }

    Ok(())
}

/// Log filter used when `RUST_LOG` is unset.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}
