pub(crate) mod auth_service;
pub(crate) mod blog_service;
pub(crate) mod profile_service;
pub(crate) mod schedule_service;
pub(crate) mod user_service;
