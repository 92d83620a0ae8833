pub(crate) mod blog_repository;
pub(crate) mod profile_repository;
pub(crate) mod repositories;
pub(crate) mod schedule_repository;
pub(crate) mod user_repository;
