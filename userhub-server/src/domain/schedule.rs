use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::fields::{validate_positive_i64, validate_title};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Schedule {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateScheduleRequest {
    pub(crate) user_id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
}

impl CreateScheduleRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_positive_i64("user_id", self.user_id)?;
        validate_title(Some(&self.title))?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateScheduleRequest {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
}

impl UpdateScheduleRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_title(self.title.as_deref())?;
        Ok(self)
    }
}

impl Schedule {
    pub(crate) fn new(
        id: i64,
        title: Option<String>,
        description: Option<String>,
        user_id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("user_id", user_id)?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            title,
            description,
            user_id,
            created_at,
            updated_at,
        })
    }
}
