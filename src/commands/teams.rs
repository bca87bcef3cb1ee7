use super::Session;
use crate::clickup::models::Teams;
use crate::clickup::request::{ApiRequest, Endpoint};
use crate::clickup::shape::{Shape, TeamIncludes};
use crate::output::Output;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum TeamsCommand {
    /// List all teams you have access to
    List {
        /// Include member information
        #[arg(long)]
        include_members: bool,
        /// Include role information
        #[arg(long)]
        include_roles: bool,
    },
}

pub async fn run(command: TeamsCommand, session: &Session) -> Result<Output> {
    match command {
        TeamsCommand::List {
            include_members,
            include_roles,
        } => {
            let client = session.client()?;
            let teams: Teams = client.send(&ApiRequest::get(Endpoint::Teams)).await?.decode()?;
            let teams = teams.shape(&TeamIncludes {
                members: include_members,
                roles: include_roles,
            });
            Output::data(&teams)
        }
    }
}
