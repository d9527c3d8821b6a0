use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named, coloured bucket of tasks owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaskGroup {
    pub id: i64,
    pub name: String,
    pub icon_data: i32,
    pub background_color: String,
    pub icon_color: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskGroupInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon_data: i32,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub icon_color: String,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskGroupPatch {
    pub name: Option<String>,
    pub icon_data: Option<i32>,
    pub background_color: Option<String>,
    pub icon_color: Option<String>,
}

impl TaskGroup {
    pub fn apply(&mut self, patch: TaskGroupPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(icon_data) = patch.icon_data {
            self.icon_data = icon_data;
        }
        if let Some(background_color) = patch.background_color {
            self.background_color = background_color;
        }
        if let Some(icon_color) = patch.icon_color {
            self.icon_color = icon_color;
        }
    }
}
