// Storage seams used by the handlers and the identity layer.
//
// Every query that touches an owned resource takes the caller's user id, so
// ownership is enforced by the store rather than re-checked in each handler.

use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{
    NewUser, Note, NoteInput, Task, TaskFilter, TaskGroup, TaskGroupInput, TaskInput, User,
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    /// Insert a new account. A second account for the same email fails with
    /// `DatabaseError::Conflict` and leaves the first row untouched.
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    /// Overwrite the stored digest; returns false when no row has that email
    async fn update_user_password(&self, email: &str, password_hash: &str) -> Result<bool, DatabaseError>;

    async fn update_user_profile(&self, id: i64, full_name: &str, image: &str) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(&self, user_id: i64, input: &NoteInput) -> Result<Note, DatabaseError>;

    async fn list_notes(&self, user_id: i64) -> Result<Vec<Note>, DatabaseError>;

    async fn find_note(&self, user_id: i64, id: i64) -> Result<Option<Note>, DatabaseError>;

    async fn update_note(&self, user_id: i64, id: i64, input: &NoteInput) -> Result<Option<Note>, DatabaseError>;

    async fn delete_note(&self, user_id: i64, id: i64) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait TaskGroupStore: Send + Sync {
    async fn create_task_group(&self, user_id: i64, input: &TaskGroupInput) -> Result<TaskGroup, DatabaseError>;

    async fn list_task_groups(&self, user_id: i64) -> Result<Vec<TaskGroup>, DatabaseError>;

    async fn find_task_group(&self, user_id: i64, id: i64) -> Result<Option<TaskGroup>, DatabaseError>;

    /// Persist every mutable column of `group`, matching on id and owner
    async fn save_task_group(&self, group: &TaskGroup) -> Result<(), DatabaseError>;

    /// Deletes the group and, by cascade, its tasks
    async fn delete_task_group(&self, user_id: i64, id: i64) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task; the caller has already checked that the group is theirs
    async fn create_task(&self, input: &TaskInput) -> Result<i64, DatabaseError>;

    async fn list_tasks(&self, user_id: i64, filter: TaskFilter<'_>) -> Result<Vec<Task>, DatabaseError>;

    async fn find_task(&self, user_id: i64, id: i64) -> Result<Option<Task>, DatabaseError>;

    /// Persist `task` only when both its stored group and its new group
    /// belong to `user_id`
    async fn save_task(&self, user_id: i64, task: &Task) -> Result<(), DatabaseError>;

    async fn delete_task(&self, user_id: i64, id: i64) -> Result<bool, DatabaseError>;
}

/// Everything the HTTP layer needs from a storage backend
#[async_trait]
pub trait Store: UserStore + NoteStore + TaskGroupStore + TaskStore {
    /// Cheap round-trip used by `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;
}
