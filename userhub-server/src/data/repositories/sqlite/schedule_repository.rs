use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::{invalid_row, map_db_error};
use crate::data::schedule_repository::{NewSchedule, SchedulePatch, ScheduleRepository};
use crate::domain::error::DomainError;
use crate::domain::schedule::Schedule;

#[derive(Debug, Clone)]
pub(crate) struct SqliteScheduleRepository {
    pool: SqlitePool,
}

impl SqliteScheduleRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ScheduleRow {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepository {
    async fn create_schedule(&self, input: NewSchedule) -> Result<Schedule, DomainError> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            r#"
            INSERT INTO schedules (title, description, user_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, title, description, user_id, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_row_to_schedule(row)
    }

    async fn get_schedule(&self, id: i64) -> Result<Option<Schedule>, DomainError> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT id, title, description, user_id, created_at, updated_at
            FROM schedules
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_schedule).transpose()
    }

    async fn list_schedules(&self) -> Result<Vec<Schedule>, DomainError> {
        let rows = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT id, title, description, user_id, created_at, updated_at
            FROM schedules
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_schedule).collect()
    }

    async fn list_schedules_for_user(&self, user_id: i64) -> Result<Vec<Schedule>, DomainError> {
        let rows = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT id, title, description, user_id, created_at, updated_at
            FROM schedules
            WHERE user_id = ?1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_schedule).collect()
    }

    async fn update_schedule(
        &self,
        id: i64,
        patch: SchedulePatch,
    ) -> Result<Option<Schedule>, DomainError> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            r#"
            UPDATE schedules
            SET title = ?2,
                description = ?3,
                updated_at = ?4
            WHERE id = ?1
            RETURNING id, title, description, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_schedule).transpose()
    }

    async fn delete_schedule(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_schedule(row: ScheduleRow) -> Result<Schedule, DomainError> {
    Schedule::new(
        row.id,
        row.title,
        row.description,
        row.user_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(invalid_row)
}
