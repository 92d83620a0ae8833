use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::presentation::AppState;
use crate::presentation::http::handlers::profiles::{
    create_profile, delete_profile, get_profile, list_profiles, update_profile,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/add_profile", post(create_profile))
        .route("/get_all_profiles", get(list_profiles))
        .route("/get_profile/{id}", get(get_profile))
        .route("/update_profile/{id}", patch(update_profile))
        .route("/delete_profile/{id}", delete(delete_profile))
}
