//! Task Filters
//!
//! Optional query dimensions for task listings and their mapping onto
//! query parameters.

use super::request::QueryParams;
use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;

/// Sort order accepted by the task listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaskOrder {
    Id,
    Created,
    Updated,
    #[value(name = "due_date", alias = "due-date")]
    DueDate,
}

impl TaskOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskOrder::Id => "id",
            TaskOrder::Created => "created",
            TaskOrder::Updated => "updated",
            TaskOrder::DueDate => "due_date",
        }
    }
}

/// Lower/upper bounds for one date field, in Unix milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub gt: Option<i64>,
    pub lt: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub archived: bool,
    pub order_by: Option<TaskOrder>,
    pub reverse: bool,
    pub subtasks: bool,
    pub statuses: Vec<String>,
    pub include_closed: bool,
    pub assignees: Vec<String>,
    pub due_date: DateRange,
    pub date_created: DateRange,
    pub date_updated: DateRange,
}

impl TaskFilter {
    /// Query parameters for one page
    pub fn to_query(&self, page: u32) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .flag("archived", self.archived)
            .set("page", Some(page))
            .set("order_by", self.order_by.map(TaskOrder::as_str))
            .flag("reverse", self.reverse)
            .flag("subtasks", self.subtasks)
            .list("statuses", &self.statuses)
            .flag("include_closed", self.include_closed)
            .list("assignees", &self.assignees);

        for (name, range) in [
            ("due_date", &self.due_date),
            ("date_created", &self.date_created),
            ("date_updated", &self.date_updated),
        ] {
            query
                .set(&format!("{}_gt", name), range.gt)
                .set(&format!("{}_lt", name), range.lt);
        }

        query
    }
}

/// Parse a timestamp given as Unix milliseconds, RFC 3339, or `YYYY-MM-DD`
/// (midnight UTC) into Unix milliseconds.
pub fn parse_timestamp(input: &str) -> Result<i64> {
    let input = input.trim();

    if let Ok(millis) = input.parse::<i64>() {
        return Ok(millis);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc).timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow!("invalid date {}", input))?;
        return Ok(midnight.and_utc().timestamp_millis());
    }

    Err(anyhow!(
        "invalid timestamp '{}': expected Unix milliseconds, RFC 3339, or YYYY-MM-DD",
        input
    ))
}
