use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::profile::Profile;

#[derive(Debug, Clone)]
pub(crate) struct NewProfile {
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) user_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct ProfilePatch {
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
}

#[async_trait]
pub(crate) trait ProfileRepository: Send + Sync {
    async fn create_profile(&self, input: NewProfile) -> Result<Profile, DomainError>;
    async fn get_profile(&self, id: i64) -> Result<Option<Profile>, DomainError>;
    async fn get_profile_for_user(&self, user_id: i64) -> Result<Option<Profile>, DomainError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError>;
    async fn update_profile(
        &self,
        id: i64,
        patch: ProfilePatch,
    ) -> Result<Option<Profile>, DomainError>;
    async fn delete_profile(&self, id: i64) -> Result<bool, DomainError>;
}
