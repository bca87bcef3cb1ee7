//! clicli
//!
//! Command-line client for the ClickUp task hierarchy
//! (Team -> Space -> Folder -> List -> Task).

pub mod cli;
pub mod clickup;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod resolve;

/// Version injected at compile time via CLICLI_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("CLICLI_VERSION") {
    Some(v) => v,
    None => "dev",
};
