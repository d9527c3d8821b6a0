use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const STATUS_TODO: &str = "TODO";
pub const STATUS_IN_PROGRESS: &str = "IN PROGRESS";

/// A task as returned to clients, joined with its group's name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub task_group_id: i64,
    pub task_group_name: String,
    pub start_date: Option<DateTime<Utc>>,
    pub finish_date: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub task_group_id: i64,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
}

/// Which tasks a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter<'a> {
    All,
    Status(&'a str),
    FinishDate(NaiveDate),
}

impl TaskFilter<'_> {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Status(status) => task.status == *status,
            TaskFilter::FinishDate(date) => task
                .finish_date
                .map(|finish| finish.date_naive() == *date)
                .unwrap_or(false),
        }
    }
}

impl Task {
    /// Merge an update body: empty strings, a zero group id and absent dates
    /// leave the stored value alone.
    pub fn apply(&mut self, update: TaskInput) {
        if !update.title.is_empty() {
            self.title = update.title;
        }
        if !update.description.is_empty() {
            self.description = update.description;
        }
        if !update.status.is_empty() {
            self.status = update.status;
        }
        if update.task_group_id != 0 {
            self.task_group_id = update.task_group_id;
        }
        if update.start_date.is_some() {
            self.start_date = update.start_date;
        }
        if update.finish_date.is_some() {
            self.finish_date = update.finish_date;
        }
    }
}
