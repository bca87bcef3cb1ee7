//! Task Pagination
//!
//! The task listing is served in fixed pages of [`PAGE_SIZE`] items
//! addressed by a zero-based page number. A page shorter than that is the
//! last one.

use super::client::ClickupClient;
use super::filter::TaskFilter;
use super::models::{Task, TaskPage};
use super::request::{ApiRequest, Endpoint};
use anyhow::Result;

/// Number of tasks the service returns per full page
pub const PAGE_SIZE: usize = 100;

/// Fetch one page as returned by the service
pub async fn fetch_page(
    client: &ClickupClient,
    list_id: &str,
    filter: &TaskFilter,
    page: u32,
) -> Result<TaskPage> {
    let request =
        ApiRequest::get(Endpoint::ListTasks(list_id.to_string())).with_query(filter.to_query(page));
    let page = client.send(&request).await?.decode::<TaskPage>()?;
    Ok(page)
}

/// Fetch a single page and mark it with its number when more pages may
/// exist (a full page) or when a page other than the first was requested.
pub async fn fetch_single_page(
    client: &ClickupClient,
    list_id: &str,
    filter: &TaskFilter,
    page: u32,
) -> Result<TaskPage> {
    let mut result = fetch_page(client, list_id, filter, page).await?;
    annotate_page(&mut result, page);
    Ok(result)
}

pub fn annotate_page(result: &mut TaskPage, page: u32) {
    if result.tasks.len() == PAGE_SIZE || page != 0 {
        result.page = Some(page);
    }
}

/// Fetch every page, in order, until a short page comes back
pub async fn collect_all(
    client: &ClickupClient,
    list_id: &str,
    filter: &TaskFilter,
) -> Result<Vec<Task>> {
    let mut tasks: Vec<Task> = Vec::new();
    let mut page: u32 = 0;

    loop {
        let fetched = fetch_page(client, list_id, filter, page).await?;
        let count = fetched.tasks.len();
        tasks.extend(fetched.tasks);
        page += 1;

        tracing::debug!("Fetched page {} ({} tasks, {} total)", page - 1, count, tasks.len());

        if !should_continue(count, tasks.len(), page) {
            break;
        }
    }

    Ok(tasks)
}

/// Keep going only after a full page, and only while every earlier page
/// was full too.
fn should_continue(last_count: usize, total: usize, pages_fetched: u32) -> bool {
    last_count == PAGE_SIZE && total == pages_fetched as usize * PAGE_SIZE
}
