use super::{parse_priority, user_value, Session};
use crate::clickup::client::ClickupClient;
use crate::clickup::filter::parse_timestamp;
use crate::clickup::lookup;
use crate::clickup::models::List;
use crate::clickup::request::{ApiRequest, Endpoint};
use crate::config::ConfigKey;
use crate::error::CommandError;
use crate::output::Output;
use crate::resolve::{Scope, Target};
use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum ListsCommand {
    /// List all lists that belong to a specific folder or space.
    /// If a folder is used, folderless lists are not included.
    List {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Include archived lists
        #[arg(short, long)]
        archived: bool,
        /// Return lists assigned to me. Your user is defined by `config set user`.
        #[arg(long)]
        me: bool,
        /// Return lists assigned to the given user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Create a new list in a specific folder or space.
    /// With --folder-id the list is created within a folder; otherwise it is
    /// a folderless list of the space given or stored in config.
    Create {
        name: String,
        content: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        fields: ListFieldArgs,
    },
    /// Get a list by id, or by name within a folder or space
    Get {
        id_or_name: String,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Rename and update a list, found either by name or by id
    Update {
        new_name: String,
        /// The original name of the list to update
        #[arg(short, long)]
        name: Option<String>,
        /// Update by ID instead of by name
        #[arg(long)]
        id: Option<String>,
        /// The content (description) of the list
        #[arg(short, long)]
        content: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        fields: ListFieldArgs,
        /// Remove the status of the list
        #[arg(long, conflicts_with = "status")]
        unset_status: bool,
    },
    /// Delete a list
    Remove {
        id: String,
        /// Do not prompt prior to deletion
        #[arg(short, long)]
        quiet: bool,
    },
}

/// Parent folder or space; config values are used when neither is given
#[derive(Args, Debug, Clone)]
pub struct ScopeArgs {
    /// The folder to work within
    #[arg(short, long)]
    folder_id: Option<String>,
    /// The space to work within (folderless lists)
    #[arg(short, long)]
    space_id: Option<String>,
}

impl ScopeArgs {
    fn resolve(&self, session: &Session) -> Result<Scope, CommandError> {
        session
            .resolver()
            .resolve_scope(self.folder_id.as_deref(), self.space_id.as_deref())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListFieldArgs {
    /// The priority of the list: 1: Urgent, 2: High, 3: Normal, 4: Low
    #[arg(short, long, value_parser = parse_priority)]
    priority: Option<u8>,
    /// Assign the list to a specific user
    #[arg(short, long)]
    assignee: Option<String>,
    /// Due date (Unix milliseconds, RFC 3339, or YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_timestamp)]
    due_date: Option<i64>,
    /// Whether the due date includes a time of day (true/false, yes/no)
    #[arg(
        short = 't',
        long,
        value_name = "DUE_TIME",
        value_parser = BoolishValueParser::new()
    )]
    due_date_time: Option<bool>,
    /// Status of the list
    #[arg(long)]
    status: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct ListBody {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unset_status: Option<bool>,
}

impl ListBody {
    fn new(name: String, content: Option<String>, fields: ListFieldArgs) -> Self {
        Self {
            name,
            content,
            due_date: fields.due_date,
            due_date_time: fields.due_date_time,
            priority: fields.priority,
            assignee: fields.assignee.as_deref().map(user_value),
            status: fields.status,
            unset_status: None,
        }
    }
}

pub async fn run(command: ListsCommand, session: &Session) -> Result<Output> {
    match command {
        ListsCommand::List {
            scope,
            archived,
            me,
            user,
        } => {
            let scope = scope.resolve(session)?;
            // A missing configured user is reported but the listing still runs unfiltered
            let user = if me || user.is_some() {
                session
                    .resolver()
                    .resolve(user.as_deref(), ConfigKey::User)
                    .reported()
                    .into_value()
            } else {
                None
            };
            let client = session.client()?;

            let mut lists = lookup::list_lists(&client, &scope, archived).await?;
            if let Some(user) = user {
                lists.lists.retain(|list| list.is_assigned_to(&user));
            }
            Output::data(&lists)
        }
        ListsCommand::Create {
            name,
            content,
            scope,
            fields,
        } => {
            let scope = scope.resolve(session)?;
            let client = session.client()?;

            let endpoint = match scope {
                Scope::Folder(id) => Endpoint::FolderLists(id),
                Scope::Space(id) => Endpoint::SpaceLists(id),
            };
            let request = ApiRequest::post(endpoint, &ListBody::new(name, content, fields))?;
            Ok(Output::Data(client.send(&request).await?.into_body()?))
        }
        ListsCommand::Get { id_or_name, scope } => {
            let client = session.client()?;
            let list_id = if is_numeric_id(&id_or_name) {
                id_or_name
            } else {
                let scope = scope.resolve(session)?;
                find_list_id(&client, &scope, id_or_name).await?
            };

            let list: List = client
                .send(&ApiRequest::get(Endpoint::List(list_id)))
                .await?
                .decode()?;
            Output::data(&list)
        }
        ListsCommand::Update {
            new_name,
            name,
            id,
            content,
            scope,
            fields,
            unset_status,
        } => {
            let target = session
                .resolver()
                .resolve_target(name.as_deref(), id.as_deref())?;
            let client = session.client()?;

            let list_id = match target {
                Target::Id(id) => id,
                Target::Name(name) => {
                    let scope = scope.resolve(session)?;
                    find_list_id(&client, &scope, name).await?
                }
            };

            let mut body = ListBody::new(new_name, content, fields);
            body.unset_status = unset_status.then_some(true);
            let request = ApiRequest::put(Endpoint::List(list_id), &body)?;
            Ok(Output::Data(client.send(&request).await?.into_body()?))
        }
        ListsCommand::Remove { id, quiet } => {
            session.confirm_destructive(
                quiet,
                "Are you sure you want to delete the list? This is not the same as archiving.",
            )?;
            let client = session.client()?;

            let response = client.send(&ApiRequest::delete(Endpoint::List(id))).await?;
            Ok(Output::Data(response.into_body()?))
        }
    }
}

fn is_numeric_id(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

async fn find_list_id(client: &ClickupClient, scope: &Scope, name: String) -> Result<String> {
    match lookup::find_list(client, scope, &name, false).await? {
        Some(list) => Ok(list.id.to_string()),
        None => Err(CommandError::EntityNotFound { kind: "list", name }.into()),
    }
}
