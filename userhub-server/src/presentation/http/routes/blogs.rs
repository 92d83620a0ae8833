use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::presentation::AppState;
use crate::presentation::http::handlers::blogs::{
    create_blog, delete_blog, get_blog, list_blogs, list_user_blogs, update_blog,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/add_blog", post(create_blog))
        .route("/get_all_blogs", get(list_blogs))
        .route("/get_blog/{id}", get(get_blog))
        .route("/get_user_blogs/{user_id}", get(list_user_blogs))
        .route("/update_blog/{id}", patch(update_blog))
        .route("/delete_blog/{id}", delete(delete_blog))
}
