//! Клиентская библиотека для работы с userhub-server по HTTP.
//!
//! `UserHubClient` хранит значение cookie сессии после `register`/`login`,
//! отправляет его в `logged_in`/`logout` и обновляет, когда сервер продлевает
//! сессию.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{ApiClientError, ApiClientResult};
pub use models::{
    AuthResponse, Blog, BlogSummary, DeleteUserReport, Profile, Schedule, ScheduleSummary,
    SessionInfo, SessionState, User, UserUpdate,
};

use http_client::{HttpClient, Reply, SessionCookie};

#[derive(Debug, Clone)]
/// Клиент REST API userhub-server.
pub struct UserHubClient {
    http: HttpClient,
    session: Option<String>,
}

impl UserHubClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> ApiClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            session: None,
        })
    }

    /// Устанавливает значение cookie сессии вручную.
    pub fn set_session(&mut self, session: impl Into<String>) {
        self.session = Some(session.into());
    }

    /// Возвращает текущее значение cookie сессии, если оно есть.
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Забывает cookie сессии локально.
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    fn apply<T>(&mut self, reply: Reply<T>) -> T {
        match reply.session {
            Some(SessionCookie::Set(value)) => self.session = Some(value),
            Some(SessionCookie::Cleared) => self.session = None,
            None => {}
        }
        reply.body
    }

    /// Регистрирует пользователя; сервер сразу открывает сессию.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiClientResult<AuthResponse> {
        let reply = self.http.register(username, email, password).await?;
        Ok(self.apply(reply))
    }

    /// Выполняет вход и сохраняет cookie сессии.
    ///
    /// Неизвестный логин и неверный пароль дают одинаковую ошибку
    /// `ApiClientError::NotFound`.
    pub async fn login(&mut self, username: &str, password: &str) -> ApiClientResult<AuthResponse> {
        let reply = self.http.login(username, password).await?;
        Ok(self.apply(reply))
    }

    /// Проверяет состояние сессии. Для активной сессии сервер продлевает срок
    /// действия cookie.
    pub async fn logged_in(&mut self) -> ApiClientResult<SessionInfo> {
        let reply = self.http.logged_in(self.session.as_deref()).await?;
        Ok(self.apply(reply))
    }

    /// Завершает сессию на сервере и забывает cookie.
    pub async fn logout(&mut self) -> ApiClientResult<()> {
        let reply = self.http.logout(self.session.as_deref()).await?;
        self.apply(reply);
        self.session = None;
        Ok(())
    }

    /// Возвращает всех пользователей вместе с их записями.
    pub async fn list_users(&self) -> ApiClientResult<Vec<User>> {
        self.http.list_users().await
    }

    /// Возвращает пользователя по идентификатору.
    pub async fn get_user(&self, id: i64) -> ApiClientResult<User> {
        self.http.get_user(id).await
    }

    /// Перезаписывает данные пользователя. Пароль не меняется.
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> ApiClientResult<User> {
        self.http.update_user(id, update).await
    }

    /// Удаляет пользователя вместе с профилем, блогами и расписаниями.
    pub async fn delete_user(&self, id: i64) -> ApiClientResult<DeleteUserReport> {
        self.http.delete_user(id).await
    }

    /// Создаёт профиль пользователя (не более одного на пользователя).
    pub async fn create_profile(
        &self,
        user_id: i64,
        state: Option<&str>,
        country: Option<&str>,
    ) -> ApiClientResult<Profile> {
        self.http.create_profile(user_id, state, country).await
    }

    /// Возвращает все профили.
    pub async fn list_profiles(&self) -> ApiClientResult<Vec<Profile>> {
        self.http.list_profiles().await
    }

    /// Возвращает профиль по идентификатору.
    pub async fn get_profile(&self, id: i64) -> ApiClientResult<Profile> {
        self.http.get_profile(id).await
    }

    /// Перезаписывает профиль; `None` очищает поле.
    pub async fn update_profile(
        &self,
        id: i64,
        state: Option<&str>,
        country: Option<&str>,
    ) -> ApiClientResult<Profile> {
        self.http.update_profile(id, state, country).await
    }

    /// Удаляет профиль.
    pub async fn delete_profile(&self, id: i64) -> ApiClientResult<()> {
        self.http.delete_profile(id).await
    }

    /// Создаёт блог пользователя.
    pub async fn create_blog(
        &self,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> ApiClientResult<Blog> {
        self.http.create_blog(user_id, title, content).await
    }

    /// Возвращает все блоги.
    pub async fn list_blogs(&self) -> ApiClientResult<Vec<Blog>> {
        self.http.list_blogs().await
    }

    /// Возвращает блоги одного пользователя.
    pub async fn list_user_blogs(&self, user_id: i64) -> ApiClientResult<Vec<Blog>> {
        self.http.list_user_blogs(user_id).await
    }

    /// Возвращает блог по идентификатору.
    pub async fn get_blog(&self, id: i64) -> ApiClientResult<Blog> {
        self.http.get_blog(id).await
    }

    /// Перезаписывает блог; `None` очищает поле.
    pub async fn update_blog(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> ApiClientResult<Blog> {
        self.http.update_blog(id, title, content).await
    }

    /// Удаляет блог.
    pub async fn delete_blog(&self, id: i64) -> ApiClientResult<()> {
        self.http.delete_blog(id).await
    }

    /// Создаёт расписание пользователя.
    pub async fn create_schedule(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
    ) -> ApiClientResult<Schedule> {
        self.http.create_schedule(user_id, title, description).await
    }

    /// Возвращает все расписания.
    pub async fn list_schedules(&self) -> ApiClientResult<Vec<Schedule>> {
        self.http.list_schedules().await
    }

    /// Возвращает расписания одного пользователя.
    pub async fn list_user_schedules(&self, user_id: i64) -> ApiClientResult<Vec<Schedule>> {
        self.http.list_user_schedules(user_id).await
    }

    /// Возвращает расписание по идентификатору.
    pub async fn get_schedule(&self, id: i64) -> ApiClientResult<Schedule> {
        self.http.get_schedule(id).await
    }

    /// Перезаписывает расписание; `None` очищает поле.
    pub async fn update_schedule(
        &self,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> ApiClientResult<Schedule> {
        self.http.update_schedule(id, title, description).await
    }

    /// Удаляет расписание.
    pub async fn delete_schedule(&self, id: i64) -> ApiClientResult<()> {
        self.http.delete_schedule(id).await
    }
}
