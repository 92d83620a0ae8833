use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct UserPatch {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) avatar: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
}

/// Rows removed together with a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CascadeReport {
    pub(crate) deleted_blogs: u64,
    pub(crate) deleted_schedules: u64,
    pub(crate) deleted_profiles: u64,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn get_user(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError>;
    /// Removes the user's schedules, blogs and profile, then the user, in one
    /// transaction. `None` when the user does not exist.
    async fn delete_user_cascade(&self, id: i64) -> Result<Option<CascadeReport>, DomainError>;
}
