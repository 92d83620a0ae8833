use crate::data::profile_repository::{NewProfile, ProfilePatch, ProfileRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::profile::{CreateProfileRequest, Profile, UpdateProfileRequest};

pub(crate) struct ProfileService<P: ProfileRepository, U: UserRepository> {
    repo: P,
    users: U,
}

impl<P: ProfileRepository, U: UserRepository> ProfileService<P, U> {
    pub(crate) fn new(repo: P, users: U) -> Self {
        Self { repo, users }
    }

    pub(crate) async fn create_profile(
        &self,
        req: CreateProfileRequest,
    ) -> Result<Profile, DomainError> {
        let req = req.validate()?;
        if self.users.get_user(req.user_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("user id: {}", req.user_id)));
        }
        if self.repo.get_profile_for_user(req.user_id).await?.is_some() {
            return Err(DomainError::AlreadyExists("profile".to_string()));
        }

        self.repo
            .create_profile(NewProfile {
                state: req.state,
                country: req.country,
                user_id: req.user_id,
            })
            .await
    }

    pub(crate) async fn get_profile(&self, id: i64) -> Result<Profile, DomainError> {
        self.repo
            .get_profile(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("profile id: {id}")))
    }

    pub(crate) async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        self.repo.list_profiles().await
    }

    pub(crate) async fn update_profile(
        &self,
        id: i64,
        req: UpdateProfileRequest,
    ) -> Result<Profile, DomainError> {
        let req = req.validate()?;
        self.repo
            .update_profile(
                id,
                ProfilePatch {
                    state: req.state,
                    country: req.country,
                },
            )
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("profile id: {id}")))
    }

    pub(crate) async fn delete_profile(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete_profile(id).await? {
            return Err(DomainError::NotFound(format!("profile id: {id}")));
        }
        Ok(())
    }
}
