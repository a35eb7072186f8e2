use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-context")]
#[command(about = "Extracts token context from crypto pages and streams it to a host")]
#[command(version)]
pub struct Args {
    /// JSON watcher configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract context from a page once and print it
    Extract {
        /// Page URL (also decides the page category)
        url: String,

        /// Read the page from a saved HTML file instead of a browser
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Open a page in a browser and stream context updates as it changes
    Watch {
        /// Page URL to open
        url: String,

        /// Override the debounce delay in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// Rewrite absolute asset paths to relative ones in built HTML files
    FixPaths {
        /// Build output directory
        dir: PathBuf,

        /// HTML files to patch (defaults to popup.html and sidepanel.html)
        #[arg(long = "file")]
        files: Vec<String>,
    },
}
