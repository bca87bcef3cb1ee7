//! Command Errors
//!
//! Failures a command reports to the user. Transport and I/O problems travel
//! as `anyhow::Error`; these variants are the ones the binary maps to
//! user-facing messages.

use crate::config::ConfigKey;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    /// A required identifier was neither given on the command line nor stored in config
    #[error("{0} not present in config file.")]
    MissingConfig(ConfigKey),

    /// Neither a folder nor a space could be resolved for a scoped command
    #[error("provide either --space-id or --folder-id.")]
    MissingScope,

    /// Rename/update called without `--name` and without `--id`
    #[error("No name or id provided.")]
    MissingNameOrId,

    /// An id that would not stay inside its path segment
    #[error("invalid id {0:?}")]
    InvalidId(String),

    #[error("No such {kind} found: {name}")]
    EntityNotFound { kind: &'static str, name: String },

    /// The service answered with status >= 400; the body is kept for display
    #[error("server responded with a {status} status code.")]
    Remote { status: u16, body: Value },

    #[error("malformed response from server: {0}")]
    MalformedResponse(String),

    #[error("Aborted!")]
    ConfirmationDeclined,

    #[error("no API key configured. Run 'clicli auth set-access-token <TOKEN>'")]
    MissingCredential,
}
