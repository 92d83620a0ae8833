use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;
use super::fields::{
    AVATAR_MAX_CHARS, COUNTRY_MAX_CHARS, STATE_MAX_CHARS, validate_max_chars,
    validate_positive_i64,
};

const USERNAME_MIN_CHARS: usize = 3;
const USERNAME_MAX_CHARS: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let email = normalize_email(&self.email)?;
        let password_len = self.password.chars().count();
        if !(8..=128).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            username,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    /// Input that cannot belong to any account is reported the same way as a
    /// wrong password.
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        let len = username.chars().count();
        let username_fits = (USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len);
        if !username_fits || self.password.is_empty() {
            return Err(DomainError::InvalidCredentials);
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

/// Full overwrite of the mutable user fields. Optional fields that are absent
/// are stored as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateUserRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) avatar: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
}

impl UpdateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let email = normalize_email(&self.email)?;
        validate_location(self.state.as_deref(), self.country.as_deref())?;
        validate_max_chars(
            "avatar",
            self.avatar.as_deref(),
            AVATAR_MAX_CHARS,
            "must be at most 255 chars",
        )?;

        Ok(Self {
            username,
            email,
            avatar: self.avatar,
            state: self.state,
            country: self.country,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) avatar: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        let username = normalize_username(&username.into())?;
        let email = normalize_email(&email.into())?;

        Ok(Self {
            id,
            username,
            email,
            avatar: None,
            state: None,
            country: None,
            created_at,
        })
    }

    pub(crate) fn with_details(
        mut self,
        avatar: Option<String>,
        state: Option<String>,
        country: Option<String>,
    ) -> Self {
        self.avatar = avatar;
        self.state = state;
        self.country = country;
        self
    }
}

pub(crate) fn validate_location(
    state: Option<&str>,
    country: Option<&str>,
) -> Result<(), DomainError> {
    validate_max_chars("state", state, STATE_MAX_CHARS, "must be at most 2 chars")?;
    validate_max_chars(
        "country",
        country,
        COUNTRY_MAX_CHARS,
        "must be at most 4 chars",
    )
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len) {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}
