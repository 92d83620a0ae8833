use sqlx::error::ErrorKind;

use crate::domain::error::DomainError;

pub(crate) mod blog_repository;
pub(crate) mod profile_repository;
pub(crate) mod schedule_repository;
pub(crate) mod user_repository;

pub(crate) use blog_repository::SqliteBlogRepository;
pub(crate) use profile_repository::SqliteProfileRepository;
pub(crate) use schedule_repository::SqliteScheduleRepository;
pub(crate) use user_repository::SqliteUserRepository;

fn map_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => {
                // sqlite reports "UNIQUE constraint failed: <table>.<column>"
                let message = db_err.message();
                let resource = if message.contains("users.username") {
                    "username"
                } else if message.contains("users.email") {
                    "email"
                } else if message.contains("profiles.user_id") {
                    "profile"
                } else {
                    "record"
                };
                return DomainError::AlreadyExists(resource.to_string());
            }
            ErrorKind::ForeignKeyViolation => {
                return DomainError::NotFound("user".to_string());
            }
            _ => {}
        }
    }
    DomainError::Unexpected(err.to_string())
}

fn invalid_row(err: DomainError) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
