//! Command-line arguments

use crate::clickup::client::DEFAULT_BASE_URL;
use crate::commands::Command;
use crate::output::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// A tool for getting, managing, and updating ClickUp issues.
///
/// ClickUp is organized into Teams -> Spaces -> Folders -> Lists -> Tasks
#[derive(Parser, Debug)]
#[command(name = "clicli", version, about, long_about)]
pub struct Cli {
    /// Config file holding default ids and the API token
    #[arg(long, global = true, env = "CLICLI_CONFIG")]
    pub config: Option<PathBuf>,

    /// API token; overrides the api-key stored in config
    #[arg(long, global = true, env = "CLICKUP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API root URL
    #[arg(long, global = true, env = "CLICKUP_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,

    /// Output format for responses
    #[arg(long, global = true, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Log level for debugging
    #[arg(long, global = true, value_enum, default_value = "off")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}
