use cookie::Cookie;
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use reqwest::{Client, Method, RequestBuilder};
use serde::{
    Deserialize, Serialize,
    de::{DeserializeOwned, IgnoredAny},
};
use std::time::Duration;

use crate::error::{ApiClientError, ApiClientResult};
use crate::models::{
    AuthResponse, Blog, DeleteUserReport, Profile, Schedule, SessionInfo, User, UserUpdate,
};

pub(crate) const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ProfileRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    state: Option<&'a str>,
    country: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct BlogRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    title: Option<&'a str>,
    content: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ScheduleRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    title: Option<&'a str>,
    description: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

/// Что сервер сделал с cookie сессии в ответе.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionCookie {
    Set(String),
    Cleared,
}

/// Тело ответа вместе с изменением cookie сессии.
#[derive(Debug)]
pub(crate) struct Reply<T> {
    pub(crate) body: T,
    pub(crate) session: Option<SessionCookie>,
}

/// Ищет cookie `session` среди заголовков `Set-Cookie`. Пустое значение или
/// `Max-Age=0` означает удаление cookie.
pub(crate) fn session_from_headers(headers: &HeaderMap) -> Option<SessionCookie> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| Cookie::parse(raw).ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| {
            let expired = cookie.max_age().is_some_and(|age| age.is_zero());
            if expired || cookie.value().is_empty() {
                SessionCookie::Cleared
            } else {
                SessionCookie::Set(cookie.value().to_string())
            }
        })
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `userhub-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> ApiClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, session: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match session {
            Some(token) => request.header(COOKIE, format!("{SESSION_COOKIE}={token}")),
            None => request,
        }
    }

    async fn decode_error(response: reqwest::Response) -> ApiClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        ApiClientError::from_http_status(status, Some(message))
    }

    async fn execute<TRes>(request: RequestBuilder) -> ApiClientResult<Reply<TRes>>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(ApiClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let session = session_from_headers(response.headers());
        let body = response
            .json::<TRes>()
            .await
            .map_err(ApiClientError::from_reqwest)?;
        Ok(Reply { body, session })
    }

    /// универсальный helper для запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        session: Option<&str>,
    ) -> ApiClientResult<Reply<TRes>>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        Self::execute(self.request(method, path, session).json(body)).await
    }

    async fn send_empty<TRes>(
        &self,
        method: Method,
        path: &str,
        session: Option<&str>,
    ) -> ApiClientResult<Reply<TRes>>
    where
        TRes: DeserializeOwned,
    {
        Self::execute(self.request(method, path, session)).await
    }

    async fn get<TRes: DeserializeOwned>(&self, path: &str) -> ApiClientResult<TRes> {
        Ok(self.send_empty(Method::GET, path, None).await?.body)
    }

    async fn delete(&self, path: &str) -> ApiClientResult<()> {
        self.send_empty::<IgnoredAny>(Method::DELETE, path, None)
            .await?;
        Ok(())
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiClientResult<Reply<AuthResponse>> {
        let payload = RegisterRequestDto {
            username,
            email,
            password,
        };
        self.send_json(Method::POST, "/api/v1/register", &payload, None)
            .await
    }

    pub(crate) async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> ApiClientResult<Reply<AuthResponse>> {
        let payload = LoginRequestDto { username, password };
        self.send_json(Method::POST, "/api/v1/login", &payload, None)
            .await
    }

    pub(crate) async fn logged_in(
        &self,
        session: Option<&str>,
    ) -> ApiClientResult<Reply<SessionInfo>> {
        self.send_empty(Method::GET, "/api/v1/logged_in", session)
            .await
    }

    pub(crate) async fn logout(&self, session: Option<&str>) -> ApiClientResult<Reply<()>> {
        let reply = self
            .send_empty::<IgnoredAny>(Method::POST, "/api/v1/logout", session)
            .await?;
        Ok(Reply {
            body: (),
            session: reply.session,
        })
    }

    pub(crate) async fn list_users(&self) -> ApiClientResult<Vec<User>> {
        self.get("/api/v1/get_all_users").await
    }

    pub(crate) async fn get_user(&self, id: i64) -> ApiClientResult<User> {
        self.get(&format!("/api/v1/get_user/{id}")).await
    }

    pub(crate) async fn update_user(&self, id: i64, update: &UserUpdate) -> ApiClientResult<User> {
        let reply = self
            .send_json(
                Method::PATCH,
                &format!("/api/v1/update_user/{id}"),
                update,
                None,
            )
            .await?;
        Ok(reply.body)
    }

    pub(crate) async fn delete_user(&self, id: i64) -> ApiClientResult<DeleteUserReport> {
        let reply = self
            .send_empty(Method::DELETE, &format!("/api/v1/delete_user/{id}"), None)
            .await?;
        Ok(reply.body)
    }

    pub(crate) async fn create_profile(
        &self,
        user_id: i64,
        state: Option<&str>,
        country: Option<&str>,
    ) -> ApiClientResult<Profile> {
        let payload = ProfileRequestDto {
            user_id: Some(user_id),
            state,
            country,
        };
        let reply = self
            .send_json(Method::POST, "/api/v1/add_profile", &payload, None)
            .await?;
        Ok(reply.body)
    }

    pub(crate) async fn list_profiles(&self) -> ApiClientResult<Vec<Profile>> {
        self.get("/api/v1/get_all_profiles").await
    }

    pub(crate) async fn get_profile(&self, id: i64) -> ApiClientResult<Profile> {
        self.get(&format!("/api/v1/get_profile/{id}")).await
    }

    pub(crate) async fn update_profile(
        &self,
        id: i64,
        state: Option<&str>,
        country: Option<&str>,
    ) -> ApiClientResult<Profile> {
        let payload = ProfileRequestDto {
            user_id: None,
            state,
            country,
        };
        let reply = self
            .send_json(
                Method::PATCH,
                &format!("/api/v1/update_profile/{id}"),
                &payload,
                None,
            )
            .await?;
        Ok(reply.body)
    }

    pub(crate) async fn delete_profile(&self, id: i64) -> ApiClientResult<()> {
        self.delete(&format!("/api/v1/delete_profile/{id}")).await
    }

    pub(crate) async fn create_blog(
        &self,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> ApiClientResult<Blog> {
        let payload = BlogRequestDto {
            user_id: Some(user_id),
            title: Some(title),
            content: Some(content),
        };
        let reply = self
            .send_json(Method::POST, "/api/v1/add_blog", &payload, None)
            .await?;
        Ok(reply.body)
    }

    pub(crate) async fn list_blogs(&self) -> ApiClientResult<Vec<Blog>> {
        self.get("/api/v1/get_all_blogs").await
    }

    pub(crate) async fn list_user_blogs(&self, user_id: i64) -> ApiClientResult<Vec<Blog>> {
        self.get(&format!("/api/v1/get_user_blogs/{user_id}")).await
    }

    pub(crate) async fn get_blog(&self, id: i64) -> ApiClientResult<Blog> {
        self.get(&format!("/api/v1/get_blog/{id}")).await
    }

    pub(crate) async fn update_blog(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> ApiClientResult<Blog> {
        let payload = BlogRequestDto {
            user_id: None,
            title,
            content,
        };
        let reply = self
            .send_json(
                Method::PATCH,
                &format!("/api/v1/update_blog/{id}"),
                &payload,
                None,
            )
            .await?;
        Ok(reply.body)
    }

    pub(crate) async fn delete_blog(&self, id: i64) -> ApiClientResult<()> {
        self.delete(&format!("/api/v1/delete_blog/{id}")).await
    }

    pub(crate) async fn create_schedule(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
    ) -> ApiClientResult<Schedule> {
        let payload = ScheduleRequestDto {
            user_id: Some(user_id),
            title: Some(title),
            description: Some(description),
        };
        let reply = self
            .send_json(Method::POST, "/api/v1/add_schedule", &payload, None)
            .await?;
        Ok(reply.body)
    }

    pub(crate) async fn list_schedules(&self) -> ApiClientResult<Vec<Schedule>> {
        self.get("/api/v1/get_all_schedules").await
    }

    pub(crate) async fn list_user_schedules(&self, user_id: i64) -> ApiClientResult<Vec<Schedule>> {
        self.get(&format!("/api/v1/get_user_schedules/{user_id}"))
            .await
    }

    pub(crate) async fn get_schedule(&self, id: i64) -> ApiClientResult<Schedule> {
        self.get(&format!("/api/v1/get_schedule/{id}")).await
    }

    pub(crate) async fn update_schedule(
        &self,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> ApiClientResult<Schedule> {
        let payload = ScheduleRequestDto {
            user_id: None,
            title,
            description,
        };
        let reply = self
            .send_json(
                Method::PATCH,
                &format!("/api/v1/update_schedule/{id}"),
                &payload,
                None,
            )
            .await?;
        Ok(reply.body)
    }

    pub(crate) async fn delete_schedule(&self, id: i64) -> ApiClientResult<()> {
        self.delete(&format!("/api/v1/delete_schedule/{id}")).await
    }
}
