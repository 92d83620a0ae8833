use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::schedule::{CreateScheduleRequest, UpdateScheduleRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::views::{MessageView, ScheduleFullView};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateScheduleDto {
    #[validate(range(min = 1))]
    pub(crate) user_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    pub(crate) description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateScheduleDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/add_schedule",
    tag = "schedules",
    request_body = CreateScheduleDto,
    responses(
        (status = 201, description = "Schedule created", body = ScheduleFullView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Owner not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_schedule(
    State(state): State<AppState>,
    Json(dto): Json<CreateScheduleDto>,
) -> AppResult<(StatusCode, Json<ScheduleFullView>)> {
    dto.validate()?;
    let req = CreateScheduleRequest {
        user_id: dto.user_id,
        title: dto.title,
        description: dto.description,
    };

    let schedule = state.schedule_service.create_schedule(req).await?;
    Ok((StatusCode::CREATED, Json(ScheduleFullView::from(schedule))))
}

#[utoipa::path(
    get,
    path = "/api/v1/get_all_schedules",
    tag = "schedules",
    responses(
        (status = 200, description = "All schedules", body = [ScheduleFullView]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_schedules(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<ScheduleFullView>>)> {
    let schedules = state.schedule_service.list_schedules().await?;
    Ok((
        StatusCode::OK,
        Json(schedules.into_iter().map(ScheduleFullView::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/get_user_schedules/{user_id}",
    tag = "schedules",
    params(
        ("user_id" = i64, Path, description = "Owner id")
    ),
    responses(
        (status = 200, description = "Schedules of one user", body = [ScheduleFullView]),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_user_schedules(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<(StatusCode, Json<Vec<ScheduleFullView>>)> {
    let schedules = state.schedule_service.list_user_schedules(user_id).await?;
    Ok((
        StatusCode::OK,
        Json(schedules.into_iter().map(ScheduleFullView::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/get_schedule/{id}",
    tag = "schedules",
    params(
        ("id" = i64, Path, description = "Schedule id")
    ),
    responses(
        (status = 200, description = "Schedule found", body = ScheduleFullView),
        (status = 404, description = "Schedule not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<ScheduleFullView>)> {
    let schedule = state.schedule_service.get_schedule(id).await?;
    Ok((StatusCode::OK, Json(ScheduleFullView::from(schedule))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/update_schedule/{id}",
    tag = "schedules",
    params(
        ("id" = i64, Path, description = "Schedule id")
    ),
    request_body = UpdateScheduleDto,
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleFullView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Schedule not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateScheduleDto>,
) -> AppResult<(StatusCode, Json<ScheduleFullView>)> {
    dto.validate()?;
    let req = UpdateScheduleRequest {
        title: dto.title,
        description: dto.description,
    };

    let schedule = state.schedule_service.update_schedule(id, req).await?;
    Ok((StatusCode::OK, Json(ScheduleFullView::from(schedule))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/delete_schedule/{id}",
    tag = "schedules",
    params(
        ("id" = i64, Path, description = "Schedule id")
    ),
    responses(
        (status = 200, description = "Schedule deleted", body = MessageView),
        (status = 404, description = "Schedule not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<MessageView>)> {
    state.schedule_service.delete_schedule(id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageView::new(format!("schedule {id} deleted"))),
    ))
}
