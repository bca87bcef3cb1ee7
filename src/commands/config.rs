use super::Session;
use crate::config::ConfigKey;
use crate::output::Output;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set various configuration values
    Set {
        #[arg(value_enum)]
        key: ConfigKey,
        value: String,
    },
    /// Get various configuration values
    Get {
        #[arg(value_enum)]
        key: ConfigKey,
    },
    /// Show the full config file
    Show,
    /// Remove a specific key from the config file
    Remove {
        #[arg(value_enum)]
        key: ConfigKey,
    },
}

pub fn run(command: ConfigCommand, session: &mut Session) -> Result<Output> {
    match command {
        ConfigCommand::Set { key, value } => {
            session.config.set(key, &value)?;
            Ok(Output::Empty)
        }
        ConfigCommand::Get { key } => {
            let value = session.resolver().resolve(None, key).require()?;
            Ok(Output::Text(value))
        }
        ConfigCommand::Show => Ok(Output::Text(session.config.contents()?)),
        ConfigCommand::Remove { key } => {
            if !session.config.remove(key)? {
                tracing::debug!("{} was not set", key);
            }
            Ok(Output::Empty)
        }
    }
}
