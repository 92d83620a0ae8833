pub(crate) mod auth;
pub(crate) mod blogs;
pub(crate) mod profiles;
pub(crate) mod schedules;
pub(crate) mod users;
