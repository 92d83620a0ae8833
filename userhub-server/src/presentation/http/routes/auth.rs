use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::AppState;
use crate::presentation::http::handlers::auth::{index, logged_in, login, logout, register};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logged_in", get(logged_in))
        .route("/logout", post(logout))
}
