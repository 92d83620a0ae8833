use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::{invalid_row, map_db_error};
use crate::data::user_repository::{
    CascadeReport, NewUser, UserCredentials, UserPatch, UserRepository,
};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    avatar: Option<String>,
    state: Option<String>,
    country: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct UserCredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

const USER_COLUMNS: &str = "id, username, email, avatar, state, country, created_at";

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_row_to_user(row)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = ?1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY id
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_user).collect()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}, password_hash
            FROM users
            WHERE username = ?1
            "#
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_credentials).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}, password_hash
            FROM users
            WHERE email = ?1
            "#
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_credentials).transpose()
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET username = ?2,
                email = ?3,
                avatar = ?4,
                state = ?5,
                country = ?6
            WHERE id = ?1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&patch.username)
        .bind(&patch.email)
        .bind(&patch.avatar)
        .bind(&patch.state)
        .bind(&patch.country)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn delete_user_cascade(&self, id: i64) -> Result<Option<CascadeReport>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;
        if exists.is_none() {
            return Ok(None);
        }

        let deleted_schedules = sqlx::query("DELETE FROM schedules WHERE user_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();
        let deleted_blogs = sqlx::query("DELETE FROM blogs WHERE user_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();
        let deleted_profiles = sqlx::query("DELETE FROM profiles WHERE user_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();
        sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some(CascadeReport {
            deleted_blogs,
            deleted_schedules,
            deleted_profiles,
        }))
    }
}

fn map_row_to_user(row: UserRow) -> Result<User, DomainError> {
    let user = User::new(row.id, row.username, row.email, row.created_at).map_err(invalid_row)?;
    Ok(user.with_details(row.avatar, row.state, row.country))
}

fn map_row_to_credentials(row: UserCredentialsRow) -> Result<UserCredentials, DomainError> {
    Ok(UserCredentials {
        user: map_row_to_user(row.user)?,
        password_hash: row.password_hash,
    })
}
