use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::{invalid_row, map_db_error};
use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::domain::blog::Blog;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct SqliteBlogRepository {
    pool: SqlitePool,
}

impl SqliteBlogRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BlogRow {
    id: i64,
    title: Option<String>,
    content: Option<String>,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl BlogRepository for SqliteBlogRepository {
    async fn create_blog(&self, input: NewBlog) -> Result<Blog, DomainError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs (title, content, user_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, title, content, user_id, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_row_to_blog(row)
    }

    async fn get_blog(&self, id: i64) -> Result<Option<Blog>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
            id,
            title,
            content,
            user_id,
            created_at,
            updated_at
            FROM blogs
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_blog).transpose()
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, DomainError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, title, content, user_id, created_at, updated_at
            FROM blogs
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_blog).collect()
    }

    async fn list_blogs_for_user(&self, user_id: i64) -> Result<Vec<Blog>, DomainError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, title, content, user_id, created_at, updated_at
            FROM blogs
            WHERE user_id = ?1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_blog).collect()
    }

    async fn update_blog(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET title = ?2,
                content = ?3,
                updated_at = ?4
            WHERE id = ?1
            RETURNING id, title, content, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_blog).transpose()
    }

    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM blogs
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_blog(row: BlogRow) -> Result<Blog, DomainError> {
    Blog::new(
        row.id,
        row.title,
        row.content,
        row.user_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(invalid_row)
}
