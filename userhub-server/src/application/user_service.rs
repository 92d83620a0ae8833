use std::collections::HashMap;

use tracing::info;

use crate::data::blog_repository::BlogRepository;
use crate::data::profile_repository::ProfileRepository;
use crate::data::schedule_repository::ScheduleRepository;
use crate::data::user_repository::{CascadeReport, UserPatch, UserRepository};
use crate::domain::blog::Blog;
use crate::domain::error::DomainError;
use crate::domain::profile::Profile;
use crate::domain::schedule::Schedule;
use crate::domain::user::{UpdateUserRequest, User};

/// A user together with the records it owns.
#[derive(Debug, Clone)]
pub(crate) struct UserDetails {
    pub(crate) user: User,
    pub(crate) profile: Option<Profile>,
    pub(crate) blogs: Vec<Blog>,
    pub(crate) schedules: Vec<Schedule>,
}

pub(crate) struct UserService<U, B, S, P>
where
    U: UserRepository,
    B: BlogRepository,
    S: ScheduleRepository,
    P: ProfileRepository,
{
    users: U,
    blogs: B,
    schedules: S,
    profiles: P,
}

impl<U, B, S, P> UserService<U, B, S, P>
where
    U: UserRepository,
    B: BlogRepository,
    S: ScheduleRepository,
    P: ProfileRepository,
{
    pub(crate) fn new(users: U, blogs: B, schedules: S, profiles: P) -> Self {
        Self {
            users,
            blogs,
            schedules,
            profiles,
        }
    }

    pub(crate) async fn get_user(&self, id: i64) -> Result<UserDetails, DomainError> {
        let user = self
            .users
            .get_user(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {id}")))?;
        self.load_details(user).await
    }

    pub(crate) async fn list_users(&self) -> Result<Vec<UserDetails>, DomainError> {
        let users = self.users.list_users().await?;

        let mut blogs = group_by_user(self.blogs.list_blogs().await?, |b| b.user_id);
        let mut schedules = group_by_user(self.schedules.list_schedules().await?, |s| s.user_id);
        let mut profiles: HashMap<i64, Profile> = self
            .profiles
            .list_profiles()
            .await?
            .into_iter()
            .map(|p| (p.user_id, p))
            .collect();

        Ok(users
            .into_iter()
            .map(|user| UserDetails {
                profile: profiles.remove(&user.id),
                blogs: blogs.remove(&user.id).unwrap_or_default(),
                schedules: schedules.remove(&user.id).unwrap_or_default(),
                user,
            })
            .collect())
    }

    pub(crate) async fn update_user(
        &self,
        id: i64,
        req: UpdateUserRequest,
    ) -> Result<UserDetails, DomainError> {
        let req = req.validate()?;
        let patch = UserPatch {
            username: req.username,
            email: req.email,
            avatar: req.avatar,
            state: req.state,
            country: req.country,
        };
        let user = self
            .users
            .update_user(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {id}")))?;
        self.load_details(user).await
    }

    pub(crate) async fn delete_user(&self, id: i64) -> Result<CascadeReport, DomainError> {
        let report = self
            .users
            .delete_user_cascade(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {id}")))?;

        info!(
            user_id = id,
            deleted_blogs = report.deleted_blogs,
            deleted_schedules = report.deleted_schedules,
            deleted_profiles = report.deleted_profiles,
            "user deleted"
        );
        Ok(report)
    }

    async fn load_details(&self, user: User) -> Result<UserDetails, DomainError> {
        let profile = self.profiles.get_profile_for_user(user.id).await?;
        let blogs = self.blogs.list_blogs_for_user(user.id).await?;
        let schedules = self.schedules.list_schedules_for_user(user.id).await?;
        Ok(UserDetails {
            user,
            profile,
            blogs,
            schedules,
        })
    }
}

fn group_by_user<T>(items: Vec<T>, user_id: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for item in items {
        grouped.entry(user_id(&item)).or_default().push(item);
    }
    grouped
}
