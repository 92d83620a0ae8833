use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::UpdateUserRequest;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::views::UserView;

/// Every field is written; omitted optional fields are cleared.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateUserDto {
    pub(crate) username: String,
    pub(crate) email: String,
    #[validate(length(max = 255))]
    pub(crate) avatar: Option<String>,
    #[validate(length(max = 2))]
    pub(crate) state: Option<String>,
    #[validate(length(max = 4))]
    pub(crate) country: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DeleteUserResponseDto {
    pub(crate) message: String,
    pub(crate) deleted_blogs: u64,
    pub(crate) deleted_schedules: u64,
    pub(crate) deleted_profiles: u64,
}

#[utoipa::path(
    get,
    path = "/api/v1/get_all_users",
    tag = "users",
    responses(
        (status = 200, description = "All users with their records", body = [UserView]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<UserView>>)> {
    let users = state.user_service.list_users().await?;
    Ok((
        StatusCode::OK,
        Json(users.into_iter().map(UserView::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/get_user/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserView),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<UserView>)> {
    let details = state.user_service.get_user(id).await?;
    Ok((StatusCode::OK, Json(UserView::from(details))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/update_user/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateUserDto>,
) -> AppResult<(StatusCode, Json<UserView>)> {
    dto.validate()?;
    let req = UpdateUserRequest {
        username: dto.username,
        email: dto.email,
        avatar: dto.avatar,
        state: dto.state,
        country: dto.country,
    };

    let details = state.user_service.update_user(id, req).await?;
    Ok((StatusCode::OK, Json(UserView::from(details))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/delete_user/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User and owned records deleted", body = DeleteUserResponseDto),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<DeleteUserResponseDto>)> {
    let report = state.user_service.delete_user(id).await?;
    Ok((
        StatusCode::OK,
        Json(DeleteUserResponseDto {
            message: format!("user {id} deleted"),
            deleted_blogs: report.deleted_blogs,
            deleted_schedules: report.deleted_schedules,
            deleted_profiles: report.deleted_profiles,
        }),
    ))
}
