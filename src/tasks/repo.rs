use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Task record in the database. `completed` and `deleted` are independent
/// flags; any combination is valid.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub account_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: Option<OffsetDateTime>,
    pub completed: bool,
    pub deleted: bool,
    pub created_at: OffsetDateTime,
}

impl Task {
    /// All tasks owned by the account, in insertion order.
    pub async fn list_for_account(db: &PgPool, account_id: Uuid) -> anyhow::Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, account_id, title, description, due_date, completed, deleted, created_at
            FROM tasks
            WHERE account_id = $1
            ORDER BY id
            "#,
        )
        .bind(account_id)
        .fetch_all(db)
        .await?;
        Ok(tasks)
    }

    /// Look up one task scoped to its owner. A task owned by another
    /// account is indistinguishable from a missing one.
    pub async fn find_for_account(
        db: &PgPool,
        id: i64,
        account_id: Uuid,
    ) -> anyhow::Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, account_id, title, description, due_date, completed, deleted, created_at
            FROM tasks
            WHERE id = $1 AND account_id = $2
            "#,
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(db)
        .await?;
        Ok(task)
    }

    /// Insert a new task; both flags start false.
    pub async fn create(
        db: &PgPool,
        account_id: Uuid,
        title: &str,
        description: &str,
        due_date: Option<OffsetDateTime>,
    ) -> anyhow::Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (account_id, title, description, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, account_id, title, description, due_date, completed, deleted, created_at
            "#,
        )
        .bind(account_id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .fetch_one(db)
        .await?;
        Ok(task)
    }

    /// Overwrite title, description, and due date. `due_date: None` clears
    /// the stored value.
    pub async fn update(
        db: &PgPool,
        id: i64,
        account_id: Uuid,
        title: &str,
        description: &str,
        due_date: Option<OffsetDateTime>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET title = $3, description = $4, due_date = $5
            WHERE id = $1 AND account_id = $2
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Mark the task completed. Idempotent; returns None on a lookup miss.
    pub async fn complete(db: &PgPool, id: i64, account_id: Uuid) -> anyhow::Result<Option<i64>> {
        let updated = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE tasks
            SET completed = TRUE
            WHERE id = $1 AND account_id = $2
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(db)
        .await?;
        Ok(updated)
    }

    /// Set or clear the soft-delete flag. Idempotent; returns None on a
    /// lookup miss.
    pub async fn set_deleted(
        db: &PgPool,
        id: i64,
        account_id: Uuid,
        deleted: bool,
    ) -> anyhow::Result<Option<i64>> {
        let updated = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE tasks
            SET deleted = $3
            WHERE id = $1 AND account_id = $2
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(deleted)
        .fetch_optional(db)
        .await?;
        Ok(updated)
    }
}
