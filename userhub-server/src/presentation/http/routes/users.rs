use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::presentation::AppState;
use crate::presentation::http::handlers::users::{
    delete_user, get_user, list_users, update_user,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/get_all_users", get(list_users))
        .route("/get_user/{id}", get(get_user))
        .route("/update_user/{id}", patch(update_user))
        .route("/delete_user/{id}", delete(delete_user))
}
