use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::auth_service::SessionStatus;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::session::{
    SessionIdentity, removal_cookie, session_cookie,
};
use crate::presentation::http::views::MessageView;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    pub(crate) username: String,
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginDto {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthMessageDto {
    pub(crate) message: String,
    pub(crate) user_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SessionState {
    Anonymous,
    LoggedIn,
    /// Valid cookie for a user that no longer exists.
    Orphaned,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SessionStatusDto {
    pub(crate) status: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) username: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1",
    tag = "auth",
    responses(
        (status = 200, description = "API greeting", body = MessageView)
    )
)]
pub(crate) async fn index() -> Json<MessageView> {
    Json(MessageView::new("hello from api"))
}

#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 200, description = "Registered and logged in", body = AuthMessageDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthMessageDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        username: dto.username,
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.register(req).await?;
    let jar = jar.add(session_cookie(&state.sessions, result.session_token));

    Ok((
        StatusCode::OK,
        jar,
        Json(AuthMessageDto {
            message: "user registered".to_string(),
            user_id: result.user.id,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = AuthMessageDto),
        (status = 404, description = "Unknown username or wrong password"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthMessageDto>)> {
    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;
    let jar = jar.add(session_cookie(&state.sessions, result.session_token));

    Ok((
        StatusCode::OK,
        jar,
        Json(AuthMessageDto {
            message: "logged in".to_string(),
            user_id: result.user.id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/logged_in",
    tag = "auth",
    responses(
        (status = 200, description = "Session state of the caller", body = SessionStatusDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn logged_in(
    State(state): State<AppState>,
    SessionIdentity(claims): SessionIdentity,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<SessionStatusDto>)> {
    let status = state.auth_service.session_status(claims).await?;

    let (jar, dto) = match status {
        SessionStatus::Anonymous => (
            jar,
            SessionStatusDto {
                status: SessionState::Anonymous,
                user_id: None,
                username: None,
            },
        ),
        SessionStatus::Authenticated {
            user,
            session_token,
        } => (
            jar.add(session_cookie(&state.sessions, session_token)),
            SessionStatusDto {
                status: SessionState::LoggedIn,
                user_id: Some(user.id),
                username: Some(user.username),
            },
        ),
        SessionStatus::Orphaned { user_id, username } => (
            jar,
            SessionStatusDto {
                status: SessionState::Orphaned,
                user_id: Some(user_id),
                username: Some(username),
            },
        ),
    };

    Ok((jar, Json(dto)))
}

#[utoipa::path(
    post,
    path = "/api/v1/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageView)
    )
)]
pub(crate) async fn logout(
    SessionIdentity(claims): SessionIdentity,
    jar: CookieJar,
) -> (CookieJar, Json<MessageView>) {
    if let Some(claims) = claims {
        info!(user_id = claims.user_id, username = %claims.username, "logged out");
    }
    (jar.remove(removal_cookie()), Json(MessageView::new("logged out")))
}
