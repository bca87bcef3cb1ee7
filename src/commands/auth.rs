use super::Session;
use crate::config::ConfigKey;
use crate::output::{self, Output};
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Set your access token. Get it from ClickUp.
    SetAccessToken {
        access_token: String,
    },
    /// Show the access token in use
    GetAccessToken,
}

pub fn run(command: AuthCommand, session: &mut Session) -> Result<Output> {
    match command {
        AuthCommand::SetAccessToken { access_token } => {
            session.config.set(ConfigKey::ApiKey, access_token.trim())?;
            output::success("Successfully saved clickup token");
            Ok(Output::Empty)
        }
        AuthCommand::GetAccessToken => {
            let token = session
                .resolver()
                .resolve(session.api_key.as_deref(), ConfigKey::ApiKey)
                .require()?;
            Ok(Output::Text(token))
        }
    }
}
