use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{
    NewUser, Note, NoteInput, Task, TaskFilter, TaskGroup, TaskGroupInput, TaskInput, User,
};
use super::store::{NoteStore, Store, TaskGroupStore, TaskStore, UserStore};

const USER_COLUMNS: &str = "id, full_name, email, password, image";
const NOTE_COLUMNS: &str = "id, user_id, title, description, created_at, updated_at";
const TASK_GROUP_COLUMNS: &str =
    "id, name, icon_data, background_color, icon_color, user_id, created_at, updated_at";

/// Tasks joined to their group so listings carry `task_group_name` and can be
/// scoped by the group's owner.
const TASK_SELECT: &str = r#"
    SELECT t.id, t.title, t.description, t.task_group_id, g.name AS task_group_name,
           t.start_date, t.finish_date, t.status, t.created_at, t.updated_at
    FROM tasks t
    JOIN task_groups g ON g.id = t.task_group_id
    WHERE g.user_id = $1
"#;

/// Calendar day of `finish_date` in UTC, independent of the session time zone
const FINISH_DAY_UTC: &str = "(t.finish_date AT TIME ZONE 'UTC')::date = $2";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (full_name, email, password, image) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.image)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)
    }

    async fn update_user_password(&self, email: &str, password_hash: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE users SET password = $2 WHERE email = $1")
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_user_profile(&self, id: i64, full_name: &str, image: &str) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET full_name = $2, image = $3 WHERE id = $1")
            .bind(id)
            .bind(full_name)
            .bind(image)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn create_note(&self, user_id: i64, input: &NoteInput) -> Result<Note, DatabaseError> {
        let note = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes (user_id, title, description) VALUES ($1, $2, $3) RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(user_id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(note)
    }

    async fn list_notes(&self, user_id: i64) -> Result<Vec<Note>, DatabaseError> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {} FROM notes WHERE user_id = $1 ORDER BY id",
            NOTE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    async fn find_note(&self, user_id: i64, id: i64) -> Result<Option<Note>, DatabaseError> {
        let note = sqlx::query_as::<_, Note>(&format!(
            "SELECT {} FROM notes WHERE id = $1 AND user_id = $2",
            NOTE_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn update_note(&self, user_id: i64, id: i64, input: &NoteInput) -> Result<Option<Note>, DatabaseError> {
        let note = sqlx::query_as::<_, Note>(&format!(
            "UPDATE notes SET title = $3, description = $4, updated_at = now() \
             WHERE id = $1 AND user_id = $2 RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn delete_note(&self, user_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskGroupStore for PgStore {
    async fn create_task_group(&self, user_id: i64, input: &TaskGroupInput) -> Result<TaskGroup, DatabaseError> {
        let group = sqlx::query_as::<_, TaskGroup>(&format!(
            "INSERT INTO task_groups (name, icon_data, background_color, icon_color, user_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            TASK_GROUP_COLUMNS
        ))
        .bind(&input.name)
        .bind(input.icon_data)
        .bind(&input.background_color)
        .bind(&input.icon_color)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(group)
    }

    async fn list_task_groups(&self, user_id: i64) -> Result<Vec<TaskGroup>, DatabaseError> {
        let groups = sqlx::query_as::<_, TaskGroup>(&format!(
            "SELECT {} FROM task_groups WHERE user_id = $1 ORDER BY id",
            TASK_GROUP_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(groups)
    }

    async fn find_task_group(&self, user_id: i64, id: i64) -> Result<Option<TaskGroup>, DatabaseError> {
        let group = sqlx::query_as::<_, TaskGroup>(&format!(
            "SELECT {} FROM task_groups WHERE id = $1 AND user_id = $2",
            TASK_GROUP_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(group)
    }

    async fn save_task_group(&self, group: &TaskGroup) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE task_groups SET name = $3, icon_data = $4, background_color = $5, icon_color = $6, \
             updated_at = now() WHERE id = $1 AND user_id = $2",
        )
        .bind(group.id)
        .bind(group.user_id)
        .bind(&group.name)
        .bind(group.icon_data)
        .bind(&group.background_color)
        .bind(&group.icon_color)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_task_group(&self, user_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM task_groups WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(&self, input: &TaskInput) -> Result<i64, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO tasks (title, description, task_group_id, start_date, finish_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.task_group_id)
        .bind(input.start_date)
        .bind(input.finish_date)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_tasks(&self, user_id: i64, filter: TaskFilter<'_>) -> Result<Vec<Task>, DatabaseError> {
        let tasks = match filter {
            TaskFilter::All => {
                sqlx::query_as::<_, Task>(&format!("{} ORDER BY t.id", TASK_SELECT))
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            TaskFilter::Status(status) => {
                sqlx::query_as::<_, Task>(&format!("{} AND t.status = $2 ORDER BY t.id", TASK_SELECT))
                    .bind(user_id)
                    .bind(status)
                    .fetch_all(&self.pool)
                    .await?
            }
            TaskFilter::FinishDate(date) => {
                sqlx::query_as::<_, Task>(&format!("{} AND {} ORDER BY t.id", TASK_SELECT, FINISH_DAY_UTC))
                .bind(user_id)
                .bind(date)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(tasks)
    }

    async fn find_task(&self, user_id: i64, id: i64) -> Result<Option<Task>, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(&format!("{} AND t.id = $2", TASK_SELECT))
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn save_task(&self, user_id: i64, task: &Task) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE tasks t SET title = $2, description = $3, task_group_id = $4, start_date = $5, \
             finish_date = $6, status = $7, updated_at = now() \
             FROM task_groups g \
             WHERE t.id = $1 AND g.id = t.task_group_id AND g.user_id = $8 \
             AND EXISTS (SELECT 1 FROM task_groups n WHERE n.id = $4 AND n.user_id = $8)",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.task_group_id)
        .bind(task.start_date)
        .bind(task.finish_date)
        .bind(&task.status)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_task(&self, user_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM tasks t USING task_groups g \
             WHERE t.id = $1 AND g.id = t.task_group_id AND g.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
