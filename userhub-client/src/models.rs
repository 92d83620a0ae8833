use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ после успешной регистрации или входа.
pub struct AuthResponse {
    /// Сообщение сервера.
    pub message: String,
    /// Идентификатор пользователя.
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Состояние сессии с точки зрения сервера.
pub enum SessionState {
    /// Cookie нет или она недействительна.
    Anonymous,
    /// Пользователь авторизован.
    LoggedIn,
    /// Cookie действительна, но пользователь уже удалён.
    Orphaned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ `GET /api/v1/logged_in`.
pub struct SessionInfo {
    /// Состояние сессии.
    pub status: SessionState,
    /// Идентификатор пользователя из сессии.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Логин пользователя из сессии.
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Пользователь вместе с профилем и краткими записями.
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Email.
    pub email: String,
    /// Ссылка на аватар.
    pub avatar: Option<String>,
    /// Код штата/региона.
    pub state: Option<String>,
    /// Код страны.
    pub country: Option<String>,
    /// Профиль, если создан.
    pub profile: Option<Profile>,
    /// Блоги пользователя (без идентификаторов).
    pub blogs: Vec<BlogSummary>,
    /// Расписания пользователя (без идентификаторов).
    pub schedules: Vec<ScheduleSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Профиль пользователя.
pub struct Profile {
    /// Идентификатор профиля.
    pub id: i64,
    /// Код штата/региона.
    pub state: Option<String>,
    /// Код страны.
    pub country: Option<String>,
    /// Владелец.
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Блог в полном виде.
pub struct Blog {
    /// Идентификатор блога.
    pub id: i64,
    /// Заголовок.
    pub title: Option<String>,
    /// Текст.
    pub content: Option<String>,
    /// Владелец.
    pub user_id: i64,
    /// Дата создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата последнего изменения (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Краткий вид блога внутри пользователя.
pub struct BlogSummary {
    /// Заголовок.
    pub title: Option<String>,
    /// Текст.
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Расписание в полном виде.
pub struct Schedule {
    /// Идентификатор расписания.
    pub id: i64,
    /// Заголовок.
    pub title: Option<String>,
    /// Описание.
    pub description: Option<String>,
    /// Владелец.
    pub user_id: i64,
    /// Дата создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата последнего изменения (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Краткий вид расписания внутри пользователя.
pub struct ScheduleSummary {
    /// Заголовок.
    pub title: Option<String>,
    /// Описание.
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Новые данные пользователя. Поля, равные `None`, будут очищены на сервере.
pub struct UserUpdate {
    /// Логин.
    pub username: String,
    /// Email.
    pub email: String,
    /// Ссылка на аватар.
    pub avatar: Option<String>,
    /// Код штата/региона.
    pub state: Option<String>,
    /// Код страны.
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Итог удаления пользователя вместе с зависимыми записями.
pub struct DeleteUserReport {
    /// Сообщение сервера.
    pub message: String,
    /// Сколько блогов удалено.
    pub deleted_blogs: u64,
    /// Сколько расписаний удалено.
    pub deleted_schedules: u64,
    /// Сколько профилей удалено.
    pub deleted_profiles: u64,
}
