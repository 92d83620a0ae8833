use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::{info, warn};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::session::{SessionClaims, SessionService};

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) session_token: String,
}

/// What the session cookie of the current request resolves to.
#[derive(Debug, Clone)]
pub(crate) enum SessionStatus {
    Anonymous,
    Authenticated {
        user: User,
        /// Re-issued token with a fresh expiry.
        session_token: String,
    },
    /// The cookie is valid but names a user that no longer exists. The cookie
    /// is left as is.
    Orphaned { user_id: i64, username: String },
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    sessions: Arc<SessionService>,
}

impl<R: UserRepository> AuthService<R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: R, sessions: Arc<SessionService>) -> Self {
        Self { repo, sessions }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        if self.repo.find_by_username(&req.username).await?.is_some() {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }

        let password_hash = self.hash_password(&req.password)?;

        let new_user = Self::into_new_user(req, password_hash);
        // a concurrent registration can still win the race; the unique
        // constraint turns that into AlreadyExists as well
        let user = self.repo.create_user(new_user).await?;
        info!(user_id = user.id, username = %user.username, "user registered");

        let session_token = self.issue_session(&user)?;
        Ok(AuthResult {
            user,
            session_token,
        })
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;
        let username = req.username.to_string();

        let user_creds = match self.repo.find_by_username(&username).await? {
            Some(user_creds) => user_creds,
            None => {
                // стремимся к одинаковому времени проверки если user не найден
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                warn!(%username, "login rejected");
                return Err(DomainError::InvalidCredentials);
            }
        };

        if let Err(err) = self.verify_password(&req.password, &user_creds.password_hash) {
            warn!(%username, "login rejected");
            return Err(err);
        }

        let session_token = self.issue_session(&user_creds.user)?;
        Ok(AuthResult {
            user: user_creds.user,
            session_token,
        })
    }

    pub(crate) async fn session_status(
        &self,
        claims: Option<SessionClaims>,
    ) -> Result<SessionStatus, DomainError> {
        let Some(claims) = claims else {
            return Ok(SessionStatus::Anonymous);
        };

        match self.repo.find_by_username(&claims.username).await? {
            Some(creds) => {
                let session_token = self.issue_session(&creds.user)?;
                Ok(SessionStatus::Authenticated {
                    user: creds.user,
                    session_token,
                })
            }
            None => Ok(SessionStatus::Orphaned {
                user_id: claims.user_id,
                username: claims.username,
            }),
        }
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    pub(crate) fn into_new_user(req: RegisterRequest, password_hash: String) -> NewUser {
        NewUser {
            username: req.username,
            email: req.email,
            password_hash,
        }
    }

    fn issue_session(&self, user: &User) -> Result<String, DomainError> {
        self.sessions
            .issue(user.id, &user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::{AuthService, SessionStatus};
    use crate::data::user_repository::{
        CascadeReport, NewUser, UserCredentials, UserPatch, UserRepository,
    };
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, RegisterRequest, User};
    use crate::infrastructure::session::{SessionClaims, SessionService};

    #[derive(Clone)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        by_username: Arc<Mutex<Option<UserCredentials>>>,
        by_email: Arc<Mutex<Option<UserCredentials>>>,
        create_user_out: User,
    }

    impl FakeUserRepo {
        fn new(create_user_out: User) -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                by_username: Arc::new(Mutex::new(None)),
                by_email: Arc::new(Mutex::new(None)),
                create_user_out,
            }
        }

        fn set_username_lookup(&self, creds: Option<UserCredentials>) {
            *self.by_username.lock().expect("by_username mutex poisoned") = creds;
        }

        fn set_email_lookup(&self, creds: Option<UserCredentials>) {
            *self.by_email.lock().expect("by_email mutex poisoned") = creds;
        }

        fn take_created_input(&self) -> Option<NewUser> {
            self.created_input
                .lock()
                .expect("created input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(self.create_user_out.clone())
        }

        async fn get_user(&self, _id: i64) -> Result<Option<User>, DomainError> {
            Ok(None)
        }

        async fn list_users(&self) -> Result<Vec<User>, DomainError> {
            Ok(Vec::new())
        }

        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .by_username
                .lock()
                .expect("by_username mutex poisoned")
                .clone())
        }

        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self.by_email.lock().expect("by_email mutex poisoned").clone())
        }

        async fn update_user(
            &self,
            _id: i64,
            _patch: UserPatch,
        ) -> Result<Option<User>, DomainError> {
            Ok(None)
        }

        async fn delete_user_cascade(
            &self,
            _id: i64,
        ) -> Result<Option<CascadeReport>, DomainError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn register_creates_user_and_issues_session() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user", "valid@example.com"));
        let sessions = test_sessions();
        let service = AuthService::new(repo.clone(), sessions.clone());

        let req = RegisterRequest {
            username: "  valid_user  ".to_string(),
            email: "  VALID@EXAMPLE.COM  ".to_string(),
            password: "very-secure-password".to_string(),
        };

        let result = service.register(req).await.expect("register must succeed");

        assert_eq!(result.user.username, "valid_user");
        let claims = sessions
            .verify(&result.session_token)
            .expect("session must verify");
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.username, "valid_user");

        let created = repo
            .take_created_input()
            .expect("create_user must be called");
        assert_eq!(created.username, "valid_user");
        assert_eq!(created.email, "valid@example.com");
        assert!(created.password_hash.starts_with("$argon2id$"));
        assert_ne!(created.password_hash, "very-secure-password");
    }

    #[tokio::test]
    async fn register_rejects_taken_username_without_creating() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user", "valid@example.com"));
        repo.set_username_lookup(Some(UserCredentials {
            user: sample_user(1, "valid_user", "valid@example.com"),
            password_hash: "hash".to_string(),
        }));
        let service = AuthService::new(repo.clone(), test_sessions());

        let err = service
            .register(register_request())
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, DomainError::AlreadyExists(resource) if resource == "username"));
        assert!(repo.take_created_input().is_none());
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user", "valid@example.com"));
        repo.set_email_lookup(Some(UserCredentials {
            user: sample_user(2, "someone_else", "valid@example.com"),
            password_hash: "hash".to_string(),
        }));
        let service = AuthService::new(repo.clone(), test_sessions());

        let err = service
            .register(register_request())
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, DomainError::AlreadyExists(resource) if resource == "email"));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user", "valid@example.com"));
        repo.set_username_lookup(None);
        let service = AuthService::new(repo, test_sessions());

        let req = LoginRequest {
            username: "valid_user".to_string(),
            password: "some-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user", "valid@example.com"));
        let service = AuthService::new(repo.clone(), test_sessions());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_username_lookup(Some(UserCredentials {
            user: sample_user(1, "valid_user", "valid@example.com"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            username: "valid_user".to_string(),
            password: "wrong-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_session_for_valid_credentials() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user", "valid@example.com"));
        let sessions = test_sessions();
        let service = AuthService::new(repo.clone(), sessions.clone());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_username_lookup(Some(UserCredentials {
            user: sample_user(1, "valid_user", "valid@example.com"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            username: "valid_user".to_string(),
            password: "correct-password".to_string(),
        };

        let result = service.login(req).await.expect("login must succeed");
        assert_eq!(result.user.id, 1);
        assert!(sessions.verify(&result.session_token).is_ok());
    }

    #[tokio::test]
    async fn session_status_without_claims_is_anonymous() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user", "valid@example.com"));
        let service = AuthService::new(repo, test_sessions());

        let status = service.session_status(None).await.expect("must resolve");
        assert!(matches!(status, SessionStatus::Anonymous));
    }

    #[tokio::test]
    async fn session_status_for_existing_user_is_authenticated() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user", "valid@example.com"));
        repo.set_username_lookup(Some(UserCredentials {
            user: sample_user(1, "valid_user", "valid@example.com"),
            password_hash: "hash".to_string(),
        }));
        let sessions = test_sessions();
        let service = AuthService::new(repo, sessions.clone());

        let status = service
            .session_status(Some(claims_for(1, "valid_user")))
            .await
            .expect("must resolve");
        match status {
            SessionStatus::Authenticated {
                user,
                session_token,
            } => {
                assert_eq!(user.id, 1);
                assert!(sessions.verify(&session_token).is_ok());
            }
            other => panic!("expected authenticated session, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn session_status_for_deleted_user_is_orphaned() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user", "valid@example.com"));
        repo.set_username_lookup(None);
        let service = AuthService::new(repo, test_sessions());

        let status = service
            .session_status(Some(claims_for(9, "gone_user")))
            .await
            .expect("must resolve");
        match status {
            SessionStatus::Orphaned { user_id, username } => {
                assert_eq!(user_id, 9);
                assert_eq!(username, "gone_user");
            }
            other => panic!("expected orphaned session, got {other:?}"),
        }
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "valid_user".to_string(),
            email: "valid@example.com".to_string(),
            password: "very-secure-password".to_string(),
        }
    }

    fn claims_for(user_id: i64, username: &str) -> SessionClaims {
        SessionClaims {
            user_id,
            username: username.to_string(),
            exp: Utc::now().timestamp() + 3600,
        }
    }

    fn sample_user(id: i64, username: &str, email: &str) -> User {
        User::new(id, username.to_string(), email.to_string(), Utc::now())
            .expect("sample user must be valid")
    }

    fn test_sessions() -> Arc<SessionService> {
        Arc::new(SessionService::new(
            "0123456789abcdef0123456789abcdef",
            3600,
            false,
        ))
    }
}
