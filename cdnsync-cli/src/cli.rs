use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cdnsync - publish static build assets to the CDN origin bucket
#[derive(Parser, Debug)]
#[command(name = "cdnsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete the current build's objects and mint a new build id
    Prebuild {
        /// JSON file holding the build id
        #[arg(long, default_value = "package.json")]
        metadata: PathBuf,
    },

    /// Upload static assets under the current build id
    Upload {
        /// `all` uploads every asset; anything else syncs the git diff
        mode: Option<String>,

        /// JSON file holding the build id
        #[arg(long, default_value = "package.json")]
        metadata: PathBuf,

        /// Repository root the asset paths are relative to
        #[arg(long, default_value = ".")]
        repo: PathBuf,
    },

    /// Resolve a locale bundle and print it as JSON
    Locale {
        /// Requested locale (defaults to en)
        locale: Option<String>,
    },

    /// Print the CDN URL for an image reference
    ImageUrl {
        src: String,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        quality: Option<u32>,
    },
}
