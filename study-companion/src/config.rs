//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use study_companion_sdk::DEFAULT_BASE_URL;

/// Study companion for course material: ask questions, explain diagrams,
/// solve equations
///
/// Without a subcommand the terminal UI starts.
#[derive(Parser, Debug, Clone)]
#[command(name = "study-companion")]
#[command(version)]
pub struct Cli {
    /// Base URL of the inference backend
    #[arg(long, env = "STUDY_COMPANION_BACKEND_URL", default_value = DEFAULT_BASE_URL)]
    pub backend_url: String,

    /// Per-request timeout in seconds
    ///
    /// Unset means requests wait as long as the backend takes.
    #[arg(long, env = "STUDY_COMPANION_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Where the terminal UI writes its log
    ///
    /// Defaults to the per-user data directory.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot operations that run without the terminal UI
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask a question against the uploaded material
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Add a study document (PDF, text, markdown) to the corpus
    Upload { path: PathBuf },
    /// Explain a diagram image
    Diagram { path: PathBuf },
    /// Solve the equation in an image step by step
    Equation { path: PathBuf },
    /// List the documents in the corpus
    Documents,
    /// Check that the backend is up
    Health,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let url = reqwest::Url::parse(&cli.backend_url)
            .with_context(|| format!("invalid backend URL '{}'", cli.backend_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("backend URL must use http or https: '{}'", cli.backend_url);
        }
        if cli.timeout_secs == Some(0) {
            bail!("timeout must be at least one second");
        }

        Ok(Self {
            backend_url: cli.backend_url.trim_end_matches('/').to_string(),
            request_timeout: cli.timeout_secs.map(Duration::from_secs),
            log_file: cli.log_file.clone().unwrap_or_else(default_log_file),
        })
    }
}

/// Log file location in the per-user data directory
pub fn default_log_file() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "study-companion", "study-companion") {
        proj_dirs.data_dir().join("study-companion.log")
    } else {
        PathBuf::from("study-companion.log")
    }
}
