//! cdnsync CLI
//!
//! Usage: cdnsync <COMMAND>
//!
//! Commands:
//!   prebuild   Delete the current build's objects and mint a new build id
//!   upload     Upload static assets (`upload all` for a full upload)
//!   locale     Resolve a locale bundle
//!   image-url  Print the CDN URL for an image reference

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Prebuild { metadata } => commands::prebuild(&metadata).await,
        Commands::Upload {
            mode,
            metadata,
            repo,
        } => commands::upload(mode.as_deref(), &metadata, &repo).await,
        Commands::Locale { locale } => commands::locale(locale.as_deref()).await,
        Commands::ImageUrl {
            src,
            width,
            quality,
        } => commands::image_url(&src, width, quality),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
