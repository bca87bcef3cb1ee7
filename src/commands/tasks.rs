use super::{parse_priority, user_value, Session};
use crate::clickup::filter::{parse_timestamp, DateRange, TaskFilter, TaskOrder};
use crate::clickup::models::TaskPage;
use crate::clickup::paginate;
use crate::clickup::request::{ApiRequest, Endpoint};
use crate::output::Output;
use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Subcommand, Debug)]
pub enum TasksCommand {
    /// List tasks from a list
    List {
        /// List ID
        #[arg(short, long)]
        list_id: String,
        /// Page of tasks to fetch (100 tasks per page)
        #[arg(long, default_value_t = 0, conflicts_with = "all")]
        page: u32,
        /// Fetch every page
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        filter: TaskFilterArgs,
    },
    /// Create a task in a list
    Create {
        name: String,
        /// List ID
        #[arg(short, long)]
        list_id: String,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
        /// The priority of the task: 1: Urgent, 2: High, 3: Normal, 4: Low
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<u8>,
        /// Assign the task to a user (repeatable)
        #[arg(short, long = "assignee")]
        assignees: Vec<String>,
        /// Status of the task
        #[arg(long)]
        status: Option<String>,
        /// Due date (Unix milliseconds, RFC 3339, or YYYY-MM-DD)
        #[arg(long, value_parser = parse_timestamp)]
        due_date: Option<i64>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct TaskFilterArgs {
    /// Include archived tasks
    #[arg(short, long)]
    archived: bool,
    /// Sort field
    #[arg(long, value_enum)]
    order_by: Option<TaskOrder>,
    /// Reverse the sort order
    #[arg(long)]
    reverse: bool,
    /// Include subtasks
    #[arg(long)]
    subtasks: bool,
    /// Only tasks with this status (repeatable)
    #[arg(long = "status")]
    statuses: Vec<String>,
    /// Include closed tasks
    #[arg(long)]
    include_closed: bool,
    /// Only tasks assigned to this user id (repeatable)
    #[arg(long = "assignee")]
    assignees: Vec<String>,
    /// Due after this time
    #[arg(long, value_parser = parse_timestamp)]
    due_date_gt: Option<i64>,
    /// Due before this time
    #[arg(long, value_parser = parse_timestamp)]
    due_date_lt: Option<i64>,
    /// Created after this time
    #[arg(long, value_parser = parse_timestamp)]
    date_created_gt: Option<i64>,
    /// Created before this time
    #[arg(long, value_parser = parse_timestamp)]
    date_created_lt: Option<i64>,
    /// Updated after this time
    #[arg(long, value_parser = parse_timestamp)]
    date_updated_gt: Option<i64>,
    /// Updated before this time
    #[arg(long, value_parser = parse_timestamp)]
    date_updated_lt: Option<i64>,
}

impl From<TaskFilterArgs> for TaskFilter {
    fn from(args: TaskFilterArgs) -> Self {
        TaskFilter {
            archived: args.archived,
            order_by: args.order_by,
            reverse: args.reverse,
            subtasks: args.subtasks,
            statuses: args.statuses,
            include_closed: args.include_closed,
            assignees: args.assignees,
            due_date: DateRange {
                gt: args.due_date_gt,
                lt: args.due_date_lt,
            },
            date_created: DateRange {
                gt: args.date_created_gt,
                lt: args.date_created_lt,
            },
            date_updated: DateRange {
                gt: args.date_updated_gt,
                lt: args.date_updated_lt,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct TaskBody {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    assignees: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<i64>,
}

pub async fn run(command: TasksCommand, session: &Session) -> Result<Output> {
    match command {
        TasksCommand::List {
            list_id,
            page,
            all,
            filter,
        } => {
            let filter = TaskFilter::from(filter);
            let client = session.client()?;

            let result = if all {
                let tasks = paginate::collect_all(&client, &list_id, &filter).await?;
                tracing::info!("Collected {} tasks from list {}", tasks.len(), list_id);
                TaskPage {
                    tasks,
                    page: None,
                    extra: Map::new(),
                }
            } else {
                paginate::fetch_single_page(&client, &list_id, &filter, page).await?
            };
            Output::data(&result)
        }
        TasksCommand::Create {
            name,
            list_id,
            description,
            priority,
            assignees,
            status,
            due_date,
        } => {
            let client = session.client()?;
            let body = TaskBody {
                name,
                description,
                priority,
                assignees: assignees.iter().map(|a| user_value(a)).collect(),
                status,
                due_date,
            };
            let request = ApiRequest::post(Endpoint::ListTasks(list_id), &body)?;
            Ok(Output::Data(client.send(&request).await?.into_body()?))
        }
    }
}
