//! Commands
//!
//! One submodule per command group. Every command runs against a
//! [`Session`] and returns an [`Output`]; printing and exit codes are left
//! to the binary.

pub mod auth;
pub mod config;
pub mod folders;
pub mod lists;
pub mod spaces;
pub mod tasks;
pub mod teams;

use crate::cli::Cli;
use crate::clickup::client::ClickupClient;
use crate::config::{ConfigKey, ConfigStore};
use crate::error::CommandError;
use crate::output::Output;
use crate::resolve::Resolver;
use anyhow::{Context, Result};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// See and manage auth information
    #[command(subcommand)]
    Auth(auth::AuthCommand),

    /// Set config values
    #[command(subcommand)]
    Config(config::ConfigCommand),

    /// Get teams you are a part of. In the UI, this is called "Workspaces"
    #[command(subcommand)]
    Teams(teams::TeamsCommand),

    /// List, view, update, and delete spaces
    #[command(subcommand)]
    Spaces(spaces::SpacesCommand),

    /// Get, create, update, delete, and more for folders
    #[command(subcommand)]
    Folders(folders::FoldersCommand),

    /// Get, create, update, delete, and more for lists
    #[command(subcommand)]
    Lists(lists::ListsCommand),

    /// Get, create, and page through tasks
    #[command(subcommand)]
    Tasks(tasks::TasksCommand),
}

/// Asks the user to approve a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Yes/no prompt on the terminal
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to read confirmation")
    }
}

/// Everything a command needs for one invocation
pub struct Session {
    pub config: ConfigStore,
    /// Stdout is a terminal: echo URLs and print ambiguity warnings
    pub interactive: bool,
    pub base_url: String,
    /// Token given on the command line or through the environment
    pub api_key: Option<String>,
    pub confirm: Box<dyn Confirm>,
}

impl Session {
    /// Load the config named on the command line (or the default one)
    pub fn from_cli(cli: &Cli, interactive: bool, confirm: Box<dyn Confirm>) -> Result<Self> {
        let path = cli.config.clone().unwrap_or_else(ConfigStore::default_path);
        let config = ConfigStore::open(path)?;
        tracing::debug!("Using config file {:?}", config.path());

        Ok(Self {
            config,
            interactive,
            base_url: cli.base_url.clone(),
            api_key: cli.api_key.clone(),
            confirm,
        })
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.config, self.interactive)
    }

    /// Build an API client; a missing token stops the command here
    pub fn client(&self) -> Result<ClickupClient> {
        let token = self
            .resolver()
            .resolve(self.api_key.as_deref(), ConfigKey::ApiKey)
            .into_value()
            .ok_or(CommandError::MissingCredential)?;

        Ok(ClickupClient::new(&self.base_url, &token)?.echo_urls(self.interactive))
    }

    /// Ask before deleting unless `quiet` was given
    pub fn confirm_destructive(&self, quiet: bool, prompt: &str) -> Result<()> {
        if quiet {
            return Ok(());
        }
        if self.confirm.confirm(prompt)? {
            Ok(())
        } else {
            tracing::info!("Destructive action declined");
            Err(CommandError::ConfirmationDeclined.into())
        }
    }
}

/// Run a parsed command
pub async fn run(command: Command, session: &mut Session) -> Result<Output> {
    match command {
        Command::Auth(cmd) => auth::run(cmd, session),
        Command::Config(cmd) => config::run(cmd, session),
        Command::Teams(cmd) => teams::run(cmd, session).await,
        Command::Spaces(cmd) => spaces::run(cmd, session).await,
        Command::Folders(cmd) => folders::run(cmd, session).await,
        Command::Lists(cmd) => lists::run(cmd, session).await,
        Command::Tasks(cmd) => tasks::run(cmd, session).await,
    }
}

/// Parse a priority between 1 (urgent) and 4 (low)
pub(crate) fn parse_priority(input: &str) -> Result<u8, String> {
    match input.trim().parse::<u8>() {
        Ok(p @ 1..=4) => Ok(p),
        _ => Err("priority must be 1 (urgent), 2 (high), 3 (normal) or 4 (low)".to_string()),
    }
}

/// User ids are numeric on the wire; anything else is sent as given
pub(crate) fn user_value(user: &str) -> serde_json::Value {
    match user.trim().parse::<u64>() {
        Ok(id) => serde_json::Value::from(id),
        Err(_) => serde_json::Value::from(user),
    }
}
