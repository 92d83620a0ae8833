use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::infrastructure::session::{SessionClaims, SessionService};
use crate::presentation::AppState;

/// Identity of the caller, resolved from the session cookie for this request
/// only. A missing, tampered or expired cookie yields `None`.
#[derive(Debug, Clone)]
pub(crate) struct SessionIdentity(pub(crate) Option<SessionClaims>);

impl FromRequestParts<AppState> for SessionIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let claims = jar
            .get(SessionService::COOKIE_NAME)
            .and_then(|cookie| state.sessions.verify(cookie.value()).ok());
        Ok(Self(claims))
    }
}

pub(crate) fn session_cookie(sessions: &SessionService, token: String) -> Cookie<'static> {
    Cookie::build((SessionService::COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(sessions.secure_cookie())
        .max_age(time::Duration::seconds(sessions.ttl_seconds()))
        .build()
}

pub(crate) fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SessionService::COOKIE_NAME).path("/").build()
}
