use axum::Router;

use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod blogs;
pub(crate) mod profiles;
pub(crate) mod schedules;
pub(crate) mod users;

/// All endpoints live flat under `/api/v1`; path names carry the action.
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(profiles::router())
        .merge(blogs::router())
        .merge(schedules::router())
}
