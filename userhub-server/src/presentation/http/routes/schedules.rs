use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::presentation::AppState;
use crate::presentation::http::handlers::schedules::{
    create_schedule, delete_schedule, get_schedule, list_schedules, list_user_schedules,
    update_schedule,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/add_schedule", post(create_schedule))
        .route("/get_all_schedules", get(list_schedules))
        .route("/get_schedule/{id}", get(get_schedule))
        .route("/get_user_schedules/{user_id}", get(list_user_schedules))
        .route("/update_schedule/{id}", patch(update_schedule))
        .route("/delete_schedule/{id}", delete(delete_schedule))
}
