use super::Session;
use crate::clickup::lookup;
use crate::clickup::models::Folder;
use crate::clickup::request::{ApiRequest, Endpoint};
use crate::clickup::shape::{FolderIncludes, Shape};
use crate::config::ConfigKey;
use crate::error::CommandError;
use crate::output::Output;
use crate::resolve::Target;
use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum FoldersCommand {
    /// List all folders that belong to a space
    List {
        /// The ID of the space to return folders for. Will use config values if not provided.
        #[arg(short, long)]
        space_id: Option<String>,
        /// Include archived folders
        #[arg(short, long)]
        archived: bool,
        #[command(flatten)]
        include: FolderIncludeArgs,
    },
    /// Get a single folder by ID
    Get {
        folder_id: String,
        #[command(flatten)]
        include: FolderIncludeArgs,
    },
    /// Create a new folder within an existing space
    Create {
        name: String,
        /// The space ID to create the folder under. Defaults to the config value.
        #[arg(short, long)]
        space_id: Option<String>,
    },
    /// Rename a folder, found either by name or by id
    Rename {
        new_name: String,
        /// The original name of the folder to rename
        #[arg(short, long)]
        name: Option<String>,
        /// Rename by ID instead of by name
        #[arg(long)]
        id: Option<String>,
        /// If a name is given, look for folders in this space. Defaults to the config value.
        #[arg(short, long)]
        space_id: Option<String>,
    },
    /// Delete a folder
    Remove {
        id: String,
        /// Do not prompt prior to deletion
        #[arg(short, long)]
        quiet: bool,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct FolderIncludeArgs {
    /// Include the lists inside each folder
    #[arg(long)]
    include_lists: bool,
    /// Include statuses of the included lists
    #[arg(long)]
    include_list_statuses: bool,
}

impl From<FolderIncludeArgs> for FolderIncludes {
    fn from(args: FolderIncludeArgs) -> Self {
        FolderIncludes {
            lists: args.include_lists,
            list_statuses: args.include_list_statuses,
        }
    }
}

#[derive(Debug, Serialize)]
struct FolderBody<'a> {
    name: &'a str,
}

pub async fn run(command: FoldersCommand, session: &Session) -> Result<Output> {
    match command {
        FoldersCommand::List {
            space_id,
            archived,
            include,
        } => {
            let space_id = session
                .resolver()
                .resolve(space_id.as_deref(), ConfigKey::SpaceId)
                .require()?;
            let client = session.client()?;

            let folders = lookup::list_folders(&client, &space_id, archived).await?;
            Output::data(&folders.shape(&include.into()))
        }
        FoldersCommand::Get { folder_id, include } => {
            let client = session.client()?;
            let folder: Folder = client
                .send(&ApiRequest::get(Endpoint::Folder(folder_id)))
                .await?
                .decode()?;
            Output::data(&folder.shape(&include.into()))
        }
        FoldersCommand::Create { name, space_id } => {
            let space_id = session
                .resolver()
                .resolve(space_id.as_deref(), ConfigKey::SpaceId)
                .require()?;
            let client = session.client()?;

            let request =
                ApiRequest::post(Endpoint::SpaceFolders(space_id), &FolderBody { name: &name })?;
            Ok(Output::Data(client.send(&request).await?.into_body()?))
        }
        FoldersCommand::Rename {
            new_name,
            name,
            id,
            space_id,
        } => {
            let target = session
                .resolver()
                .resolve_target(name.as_deref(), id.as_deref())?;
            let client = session.client()?;

            let folder_id = match target {
                Target::Id(id) => id,
                Target::Name(name) => {
                    let space_id = session
                        .resolver()
                        .resolve(space_id.as_deref(), ConfigKey::SpaceId)
                        .require()?;
                    lookup::find_folder(&client, &space_id, &name, false)
                        .await?
                        .ok_or_else(|| CommandError::EntityNotFound {
                            kind: "folder",
                            name: name.clone(),
                        })?
                        .id
                        .to_string()
                }
            };

            let request =
                ApiRequest::put(Endpoint::Folder(folder_id), &FolderBody { name: &new_name })?;
            Ok(Output::Data(client.send(&request).await?.into_body()?))
        }
        FoldersCommand::Remove { id, quiet } => {
            session.confirm_destructive(
                quiet,
                "Are you sure you want to delete the folder? This is not the same as archiving.",
            )?;
            let client = session.client()?;

            let response = client.send(&ApiRequest::delete(Endpoint::Folder(id))).await?;
            Ok(Output::Data(response.into_body()?))
        }
    }
}
