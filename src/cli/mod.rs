use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the accessibility consultant a question
    Chat {
        message: String,

        /// JSON array of earlier turns: [{"role": "user"|"model", "text": "..."}]
        #[arg(long)]
        history_file: Option<PathBuf>,
    },

    /// Simulated (heuristic, non-crawling) accessibility audit of a URL
    AnalyzeSite {
        url: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Heuristic accessibility commentary on a screenshot
    AnalyzeImage { path: PathBuf },

    /// Serve the JSON HTTP API
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },
}
