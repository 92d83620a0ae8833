pub(crate) mod blog;
pub(crate) mod error;
pub(crate) mod fields;
pub(crate) mod profile;
pub(crate) mod schedule;
pub(crate) mod user;
