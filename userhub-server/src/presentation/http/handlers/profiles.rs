use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::profile::{CreateProfileRequest, UpdateProfileRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::views::{MessageView, ProfileView};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateProfileDto {
    #[validate(range(min = 1))]
    pub(crate) user_id: i64,
    #[validate(length(max = 2))]
    pub(crate) state: Option<String>,
    #[validate(length(max = 4))]
    pub(crate) country: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateProfileDto {
    #[validate(length(max = 2))]
    pub(crate) state: Option<String>,
    #[validate(length(max = 4))]
    pub(crate) country: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/add_profile",
    tag = "profiles",
    request_body = CreateProfileDto,
    responses(
        (status = 201, description = "Profile created", body = ProfileView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Owner not found"),
        (status = 409, description = "User already has a profile"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_profile(
    State(state): State<AppState>,
    Json(dto): Json<CreateProfileDto>,
) -> AppResult<(StatusCode, Json<ProfileView>)> {
    dto.validate()?;
    let req = CreateProfileRequest {
        user_id: dto.user_id,
        state: dto.state,
        country: dto.country,
    };

    let profile = state.profile_service.create_profile(req).await?;
    Ok((StatusCode::CREATED, Json(ProfileView::from(profile))))
}

#[utoipa::path(
    get,
    path = "/api/v1/get_all_profiles",
    tag = "profiles",
    responses(
        (status = 200, description = "All profiles", body = [ProfileView]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_profiles(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<ProfileView>>)> {
    let profiles = state.profile_service.list_profiles().await?;
    Ok((
        StatusCode::OK,
        Json(profiles.into_iter().map(ProfileView::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/get_profile/{id}",
    tag = "profiles",
    params(
        ("id" = i64, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Profile found", body = ProfileView),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<ProfileView>)> {
    let profile = state.profile_service.get_profile(id).await?;
    Ok((StatusCode::OK, Json(ProfileView::from(profile))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/update_profile/{id}",
    tag = "profiles",
    params(
        ("id" = i64, Path, description = "Profile id")
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ProfileView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateProfileDto>,
) -> AppResult<(StatusCode, Json<ProfileView>)> {
    dto.validate()?;
    let req = UpdateProfileRequest {
        state: dto.state,
        country: dto.country,
    };

    let profile = state.profile_service.update_profile(id, req).await?;
    Ok((StatusCode::OK, Json(ProfileView::from(profile))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/delete_profile/{id}",
    tag = "profiles",
    params(
        ("id" = i64, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Profile deleted", body = MessageView),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<MessageView>)> {
    state.profile_service.delete_profile(id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageView::new(format!("profile {id} deleted"))),
    ))
}
