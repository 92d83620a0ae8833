use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::fields::validate_positive_i64;
use super::user::validate_location;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Profile {
    pub(crate) id: i64,
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateProfileRequest {
    pub(crate) user_id: i64,
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
}

impl CreateProfileRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_positive_i64("user_id", self.user_id)?;
        validate_location(self.state.as_deref(), self.country.as_deref())?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateProfileRequest {
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
}

impl UpdateProfileRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_location(self.state.as_deref(), self.country.as_deref())?;
        Ok(self)
    }
}

impl Profile {
    pub(crate) fn new(
        id: i64,
        state: Option<String>,
        country: Option<String>,
        user_id: i64,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("user_id", user_id)?;
        Ok(Self {
            id,
            state,
            country,
            user_id,
        })
    }
}
