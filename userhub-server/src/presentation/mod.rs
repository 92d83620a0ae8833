use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::application::profile_service::ProfileService;
use crate::application::schedule_service::ScheduleService;
use crate::application::user_service::UserService;
use crate::data::repositories::sqlite::{
    SqliteBlogRepository, SqliteProfileRepository, SqliteScheduleRepository,
    SqliteUserRepository,
};
use crate::infrastructure::session::SessionService;

pub(crate) mod http;

pub(crate) type SqliteUserService = UserService<
    SqliteUserRepository,
    SqliteBlogRepository,
    SqliteScheduleRepository,
    SqliteProfileRepository,
>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pool: SqlitePool,
    pub(crate) auth_service: Arc<AuthService<SqliteUserRepository>>,
    pub(crate) user_service: Arc<SqliteUserService>,
    pub(crate) profile_service: Arc<ProfileService<SqliteProfileRepository, SqliteUserRepository>>,
    pub(crate) blog_service: Arc<BlogService<SqliteBlogRepository, SqliteUserRepository>>,
    pub(crate) schedule_service:
        Arc<ScheduleService<SqliteScheduleRepository, SqliteUserRepository>>,
    pub(crate) sessions: Arc<SessionService>,
}

impl AppState {
    pub(crate) fn new(pool: SqlitePool, sessions: Arc<SessionService>) -> Self {
        let users = SqliteUserRepository::new(pool.clone());
        let blogs = SqliteBlogRepository::new(pool.clone());
        let schedules = SqliteScheduleRepository::new(pool.clone());
        let profiles = SqliteProfileRepository::new(pool.clone());

        Self {
            auth_service: Arc::new(AuthService::new(users.clone(), sessions.clone())),
            user_service: Arc::new(UserService::new(
                users.clone(),
                blogs.clone(),
                schedules.clone(),
                profiles.clone(),
            )),
            profile_service: Arc::new(ProfileService::new(profiles, users.clone())),
            blog_service: Arc::new(BlogService::new(blogs, users.clone())),
            schedule_service: Arc::new(ScheduleService::new(schedules, users)),
            sessions,
            pool,
        }
    }
}
