use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{
    NewUser, Note, NoteInput, Task, TaskFilter, TaskGroup, TaskGroupInput, TaskInput, User,
};
use super::store::{NoteStore, Store, TaskGroupStore, TaskStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    notes: BTreeMap<i64, Note>,
    task_groups: BTreeMap<i64, TaskGroup>,
    /// Stored with an empty `task_group_name`; filled in on read
    tasks: BTreeMap<i64, Task>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn owned_group(&self, user_id: i64, group_id: i64) -> Option<&TaskGroup> {
        self.task_groups
            .get(&group_id)
            .filter(|group| group.user_id == user_id)
    }

    /// Resolve a stored task for `user_id`, filling in the current group name
    fn task_view(&self, user_id: i64, row: &Task) -> Option<Task> {
        let group = self.owned_group(user_id, row.task_group_id)?;
        let mut task = row.clone();
        task.task_group_name = group.name.clone();
        Some(task)
    }
}

/// In-process store with the same contract as `PgStore`, including the
/// unique email constraint and cascading group deletes. Used by the test
/// suite and by `APP_STORAGE=memory` for local runs without Postgres.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("users_email_key".to_string()));
        }
        let id = tables.next_id();
        let row = User {
            id,
            full_name: user.full_name,
            email: user.email,
            password: user.password_hash,
            image: user.image,
        };
        tables.users.insert(id, row.clone());
        Ok(row)
    }

    async fn update_user_password(&self, email: &str, password_hash: &str) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.users.values_mut().find(|u| u.email == email) {
            Some(user) => {
                user.password = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_user_profile(&self, id: i64, full_name: &str, image: &str) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.get_mut(&id) {
            user.full_name = full_name.to_string();
            user.image = image.to_string();
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, user_id: i64, input: &NoteInput) -> Result<Note, DatabaseError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let now = Utc::now();
        let note = Note {
            id,
            user_id,
            title: input.title.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.notes.insert(id, note.clone());
        Ok(note)
    }

    async fn list_notes(&self, user_id: i64) -> Result<Vec<Note>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_note(&self, user_id: i64, id: i64) -> Result<Option<Note>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.notes.get(&id).filter(|n| n.user_id == user_id).cloned())
    }

    async fn update_note(&self, user_id: i64, id: i64, input: &NoteInput) -> Result<Option<Note>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(note) = tables.notes.get_mut(&id).filter(|n| n.user_id == user_id) else {
            return Ok(None);
        };
        note.title = input.title.clone();
        note.description = input.description.clone();
        note.updated_at = Utc::now();
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, user_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let owned = tables.notes.get(&id).map(|n| n.user_id == user_id).unwrap_or(false);
        if owned {
            tables.notes.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl TaskGroupStore for MemoryStore {
    async fn create_task_group(&self, user_id: i64, input: &TaskGroupInput) -> Result<TaskGroup, DatabaseError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let now = Utc::now();
        let group = TaskGroup {
            id,
            name: input.name.clone(),
            icon_data: input.icon_data,
            background_color: input.background_color.clone(),
            icon_color: input.icon_color.clone(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.task_groups.insert(id, group.clone());
        Ok(group)
    }

    async fn list_task_groups(&self, user_id: i64) -> Result<Vec<TaskGroup>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .task_groups
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_task_group(&self, user_id: i64, id: i64) -> Result<Option<TaskGroup>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.owned_group(user_id, id).cloned())
    }

    async fn save_task_group(&self, group: &TaskGroup) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(stored) = tables
            .task_groups
            .get_mut(&group.id)
            .filter(|g| g.user_id == group.user_id)
        {
            stored.name = group.name.clone();
            stored.icon_data = group.icon_data;
            stored.background_color = group.background_color.clone();
            stored.icon_color = group.icon_color.clone();
            stored.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_task_group(&self, user_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.owned_group(user_id, id).is_none() {
            return Ok(false);
        }
        tables.task_groups.remove(&id);
        tables.tasks.retain(|_, row| row.task_group_id != id);
        Ok(true)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, input: &TaskInput) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.task_groups.contains_key(&input.task_group_id) {
            return Err(DatabaseError::QueryError(format!(
                "task group {} does not exist",
                input.task_group_id
            )));
        }
        let id = tables.next_id();
        let now = Utc::now();
        let task = Task {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            task_group_id: input.task_group_id,
            task_group_name: String::new(),
            start_date: input.start_date,
            finish_date: input.finish_date,
            status: input.status.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.tasks.insert(id, task);
        Ok(id)
    }

    async fn list_tasks(&self, user_id: i64, filter: TaskFilter<'_>) -> Result<Vec<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter_map(|row| tables.task_view(user_id, row))
            .filter(|task| filter.matches(task))
            .collect())
    }

    async fn find_task(&self, user_id: i64, id: i64) -> Result<Option<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.get(&id).and_then(|row| tables.task_view(user_id, row)))
    }

    async fn save_task(&self, user_id: i64, task: &Task) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .tasks
            .get(&task.id)
            .and_then(|row| tables.task_view(user_id, row))
            .is_some();
        if !owned || tables.owned_group(user_id, task.task_group_id).is_none() {
            return Ok(());
        }
        if let Some(row) = tables.tasks.get_mut(&task.id) {
            *row = Task {
                task_group_name: String::new(),
                updated_at: Utc::now(),
                ..task.clone()
            };
        }
        Ok(())
    }

    async fn delete_task(&self, user_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .tasks
            .get(&id)
            .and_then(|row| tables.task_view(user_id, row))
            .is_some();
        if owned {
            tables.tasks.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
