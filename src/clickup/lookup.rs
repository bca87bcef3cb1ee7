//! Name Lookup
//!
//! Turns a human name into an entity by fetching the listing of its parent
//! scope and scanning it in server order. Nothing is cached; every lookup
//! fetches again. When several entries share a name, the first one the
//! service returns wins.

use super::client::ClickupClient;
use super::models::{Folder, Folders, List, Lists, Named};
use super::request::{ApiRequest, Endpoint, QueryParams};
use crate::resolve::Scope;
use anyhow::Result;

/// First entity with an exact, case-sensitive name match
pub fn find_by_name<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.name() == name)
}

fn archived_query(archived: bool) -> QueryParams {
    let mut query = QueryParams::new();
    query.flag("archived", archived);
    query
}

/// Folders of a space
pub async fn list_folders(
    client: &ClickupClient,
    space_id: &str,
    archived: bool,
) -> Result<Folders> {
    let request = ApiRequest::get(Endpoint::SpaceFolders(space_id.to_string()))
        .with_query(archived_query(archived));
    Ok(client.send(&request).await?.decode()?)
}

/// Lists of a folder, or folderless lists of a space
pub async fn list_lists(client: &ClickupClient, scope: &Scope, archived: bool) -> Result<Lists> {
    let endpoint = match scope {
        Scope::Folder(id) => Endpoint::FolderLists(id.clone()),
        Scope::Space(id) => Endpoint::SpaceLists(id.clone()),
    };
    let request = ApiRequest::get(endpoint).with_query(archived_query(archived));
    Ok(client.send(&request).await?.decode()?)
}

pub async fn find_folder(
    client: &ClickupClient,
    space_id: &str,
    name: &str,
    archived: bool,
) -> Result<Option<Folder>> {
    let folders = list_folders(client, space_id, archived).await?;
    Ok(find_by_name(&folders.folders, name).cloned())
}

pub async fn find_list(
    client: &ClickupClient,
    scope: &Scope,
    name: &str,
    archived: bool,
) -> Result<Option<List>> {
    let lists = list_lists(client, scope, archived).await?;
    let found = find_by_name(&lists.lists, name).cloned();
    if found.is_none() {
        tracing::debug!("No list named {:?} in {:?}", name, scope);
    }
    Ok(found)
}
