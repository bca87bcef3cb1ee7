use super::Session;
use crate::clickup::models::{Space, Spaces};
use crate::clickup::request::{ApiRequest, Endpoint, QueryParams};
use crate::clickup::shape::{Shape, SpaceIncludes};
use crate::config::ConfigKey;
use crate::output::Output;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum SpacesCommand {
    /// List all spaces you have access to
    List {
        /// The team ID you want to access. Will use config values if not provided.
        #[arg(short, long)]
        team_id: Option<String>,
        /// Include archived spaces
        #[arg(short, long)]
        archived: bool,
        #[command(flatten)]
        include: SpaceIncludeArgs,
    },
    /// Get a single space and associated information
    Get {
        /// The ID of the space to return. Will use config values if not provided.
        #[arg(short, long)]
        space_id: Option<String>,
        #[command(flatten)]
        include: SpaceIncludeArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct SpaceIncludeArgs {
    /// Include feature information
    #[arg(long)]
    include_features: bool,
    /// Include any custom status information
    #[arg(long)]
    include_statuses: bool,
}

impl From<SpaceIncludeArgs> for SpaceIncludes {
    fn from(args: SpaceIncludeArgs) -> Self {
        SpaceIncludes {
            features: args.include_features,
            statuses: args.include_statuses,
        }
    }
}

pub async fn run(command: SpacesCommand, session: &Session) -> Result<Output> {
    match command {
        SpacesCommand::List {
            team_id,
            archived,
            include,
        } => {
            let team_id = session
                .resolver()
                .resolve(team_id.as_deref(), ConfigKey::TeamId)
                .require()?;
            let client = session.client()?;

            let mut query = QueryParams::new();
            query.flag("archived", archived);
            let request = ApiRequest::get(Endpoint::TeamSpaces(team_id)).with_query(query);

            let spaces: Spaces = client.send(&request).await?.decode()?;
            Output::data(&spaces.shape(&include.into()))
        }
        SpacesCommand::Get { space_id, include } => {
            let space_id = session
                .resolver()
                .resolve(space_id.as_deref(), ConfigKey::SpaceId)
                .require()?;
            let client = session.client()?;

            let space: Space = client
                .send(&ApiRequest::get(Endpoint::Space(space_id)))
                .await?
                .decode()?;
            Output::data(&space.shape(&include.into()))
        }
    }
}
