use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

use super::{invalid_row, map_db_error};
use crate::data::profile_repository::{NewProfile, ProfilePatch, ProfileRepository};
use crate::domain::error::DomainError;
use crate::domain::profile::Profile;

#[derive(Debug, Clone)]
pub(crate) struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProfileRow {
    id: i64,
    state: Option<String>,
    country: Option<String>,
    user_id: i64,
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn create_profile(&self, input: NewProfile) -> Result<Profile, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (state, country, user_id)
            VALUES (?1, ?2, ?3)
            RETURNING id, state, country, user_id
            "#,
        )
        .bind(&input.state)
        .bind(&input.country)
        .bind(input.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_row_to_profile(row)
    }

    async fn get_profile(&self, id: i64) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, state, country, user_id FROM profiles WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_profile).transpose()
    }

    async fn get_profile_for_user(&self, user_id: i64) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, state, country, user_id FROM profiles WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_profile).transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, state, country, user_id FROM profiles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_profile).collect()
    }

    async fn update_profile(
        &self,
        id: i64,
        patch: ProfilePatch,
    ) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE profiles
            SET state = ?2,
                country = ?3
            WHERE id = ?1
            RETURNING id, state, country, user_id
            "#,
        )
        .bind(id)
        .bind(&patch.state)
        .bind(&patch.country)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_profile).transpose()
    }

    async fn delete_profile(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_profile(row: ProfileRow) -> Result<Profile, DomainError> {
    Profile::new(row.id, row.state, row.country, row.user_id).map_err(invalid_row)
}
