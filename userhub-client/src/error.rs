use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `userhub-client`.
pub enum ApiClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный ресурс не найден, либо неверные логин/пароль.
    #[error("not found: {0}")]
    NotFound(String),

    /// Запись с такими данными уже существует.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Некорректный запрос или ошибка валидации на сервере.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Сервер вернул 5xx.
    #[error("server error: {0}")]
    Server(String),
}

/// Результат операций `userhub-client`.
pub type ApiClientResult<T> = Result<T, ApiClientError>;

impl ApiClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(message),
            reqwest::StatusCode::CONFLICT => Self::Conflict(message),
            status if status.is_server_error() => Self::Server(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClientError;

    #[test]
    fn maps_statuses_to_variants() {
        let not_found = ApiClientError::from_http_status(
            reqwest::StatusCode::NOT_FOUND,
            Some("blog id: 1 not found".to_string()),
        );
        assert!(matches!(not_found, ApiClientError::NotFound(msg) if msg.contains("blog")));

        let conflict = ApiClientError::from_http_status(reqwest::StatusCode::CONFLICT, None);
        assert!(matches!(conflict, ApiClientError::Conflict(msg) if msg.contains("409")));

        let server = ApiClientError::from_http_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            Some("internal error".to_string()),
        );
        assert!(matches!(server, ApiClientError::Server(_)));

        let bad = ApiClientError::from_http_status(reqwest::StatusCode::BAD_REQUEST, None);
        assert!(matches!(bad, ApiClientError::InvalidRequest(_)));
    }
}
