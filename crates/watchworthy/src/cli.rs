use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "watchworthy")]
#[command(version)]
#[command(about = "Worth the Watch? Summarize a video before you spend the time")]
pub struct Cli {
    /// Analysis service endpoint (overrides config.json)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Directory holding config.json and history (default: ~/.watchworthy)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a video URL
    Analyze {
        /// Video URL
        url: String,

        /// Print the raw analysis document as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent analyses (0 = most recent)
    History,

    /// Show a recent analysis again without contacting the service
    Replay {
        /// Position in the history list
        index: usize,

        /// Print the raw analysis document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show endpoint and storage status
    Status,

    /// Print version information
    Version,
}
