use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::blog::{CreateBlogRequest, UpdateBlogRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::views::{BlogFullView, MessageView};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateBlogDto {
    #[validate(range(min = 1))]
    pub(crate) user_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    pub(crate) content: String,
}

/// Both fields are written as sent; an omitted field becomes null.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateBlogDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/add_blog",
    tag = "blogs",
    request_body = CreateBlogDto,
    responses(
        (status = 201, description = "Blog created", body = BlogFullView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Owner not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_blog(
    State(state): State<AppState>,
    Json(dto): Json<CreateBlogDto>,
) -> AppResult<(StatusCode, Json<BlogFullView>)> {
    dto.validate()?;
    let req = CreateBlogRequest {
        user_id: dto.user_id,
        title: dto.title,
        content: dto.content,
    };

    let blog = state.blog_service.create_blog(req).await?;
    Ok((StatusCode::CREATED, Json(BlogFullView::from(blog))))
}

#[utoipa::path(
    get,
    path = "/api/v1/get_all_blogs",
    tag = "blogs",
    responses(
        (status = 200, description = "All blogs", body = [BlogFullView]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_blogs(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<BlogFullView>>)> {
    let blogs = state.blog_service.list_blogs().await?;
    Ok((
        StatusCode::OK,
        Json(blogs.into_iter().map(BlogFullView::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/get_user_blogs/{user_id}",
    tag = "blogs",
    params(
        ("user_id" = i64, Path, description = "Owner id")
    ),
    responses(
        (status = 200, description = "Blogs of one user", body = [BlogFullView]),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_user_blogs(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<(StatusCode, Json<Vec<BlogFullView>>)> {
    let blogs = state.blog_service.list_user_blogs(user_id).await?;
    Ok((
        StatusCode::OK,
        Json(blogs.into_iter().map(BlogFullView::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/get_blog/{id}",
    tag = "blogs",
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    responses(
        (status = 200, description = "Blog found", body = BlogFullView),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<BlogFullView>)> {
    let blog = state.blog_service.get_blog(id).await?;
    Ok((StatusCode::OK, Json(BlogFullView::from(blog))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/update_blog/{id}",
    tag = "blogs",
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    request_body = UpdateBlogDto,
    responses(
        (status = 200, description = "Blog updated", body = BlogFullView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateBlogDto>,
) -> AppResult<(StatusCode, Json<BlogFullView>)> {
    dto.validate()?;
    let req = UpdateBlogRequest {
        title: dto.title,
        content: dto.content,
    };

    let blog = state.blog_service.update_blog(id, req).await?;
    Ok((StatusCode::OK, Json(BlogFullView::from(blog))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/delete_blog/{id}",
    tag = "blogs",
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    responses(
        (status = 200, description = "Blog deleted", body = MessageView),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<MessageView>)> {
    state.blog_service.delete_blog(id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageView::new(format!("blog {id} deleted"))),
    ))
}
