use crate::data::schedule_repository::{NewSchedule, SchedulePatch, ScheduleRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::schedule::{CreateScheduleRequest, Schedule, UpdateScheduleRequest};

pub(crate) struct ScheduleService<S: ScheduleRepository, U: UserRepository> {
    repo: S,
    users: U,
}

impl<S: ScheduleRepository, U: UserRepository> ScheduleService<S, U> {
    pub(crate) fn new(repo: S, users: U) -> Self {
        Self { repo, users }
    }

    pub(crate) async fn create_schedule(
        &self,
        req: CreateScheduleRequest,
    ) -> Result<Schedule, DomainError> {
        let req = req.validate()?;
        self.ensure_user_exists(req.user_id).await?;

        self.repo
            .create_schedule(NewSchedule {
                title: req.title,
                description: req.description,
                user_id: req.user_id,
            })
            .await
    }

    pub(crate) async fn get_schedule(&self, id: i64) -> Result<Schedule, DomainError> {
        self.repo
            .get_schedule(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("schedule id: {id}")))
    }

    pub(crate) async fn list_schedules(&self) -> Result<Vec<Schedule>, DomainError> {
        self.repo.list_schedules().await
    }

    pub(crate) async fn list_user_schedules(
        &self,
        user_id: i64,
    ) -> Result<Vec<Schedule>, DomainError> {
        self.ensure_user_exists(user_id).await?;
        self.repo.list_schedules_for_user(user_id).await
    }

    pub(crate) async fn update_schedule(
        &self,
        id: i64,
        req: UpdateScheduleRequest,
    ) -> Result<Schedule, DomainError> {
        let req = req.validate()?;
        let patch = SchedulePatch {
            title: req.title,
            description: req.description,
        };
        self.repo
            .update_schedule(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("schedule id: {id}")))
    }

    pub(crate) async fn delete_schedule(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete_schedule(id).await? {
            return Err(DomainError::NotFound(format!("schedule id: {id}")));
        }
        Ok(())
    }

    async fn ensure_user_exists(&self, user_id: i64) -> Result<(), DomainError> {
        self.users
            .get_user(user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::ScheduleService;
    use crate::data::repositories::sqlite::{SqliteScheduleRepository, SqliteUserRepository};
    use crate::data::user_repository::{NewUser, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::schedule::{CreateScheduleRequest, UpdateScheduleRequest};
    use crate::infrastructure::database::memory_pool;

    async fn service_and_user()
    -> (ScheduleService<SqliteScheduleRepository, SqliteUserRepository>, i64) {
        let pool = memory_pool().await;
        let users = SqliteUserRepository::new(pool.clone());
        let user = users
            .create_user(NewUser {
                username: "planner".to_string(),
                email: "planner@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .expect("user must be created");
        (
            ScheduleService::new(SqliteScheduleRepository::new(pool), users),
            user.id,
        )
    }

    #[tokio::test]
    async fn schedule_lifecycle() {
        let (service, user_id) = service_and_user().await;

        let created = service
            .create_schedule(CreateScheduleRequest {
                user_id,
                title: "Standup".to_string(),
                description: "09:30 daily".to_string(),
            })
            .await
            .expect("create must succeed");
        assert_eq!(created.user_id, user_id);

        let updated = service
            .update_schedule(
                created.id,
                UpdateScheduleRequest {
                    title: Some("Standup (moved)".to_string()),
                    description: None,
                },
            )
            .await
            .expect("update must succeed");
        assert_eq!(updated.title.as_deref(), Some("Standup (moved)"));
        assert!(updated.description.is_none());

        assert_eq!(
            service
                .list_user_schedules(user_id)
                .await
                .expect("list")
                .len(),
            1
        );

        service
            .delete_schedule(created.id)
            .await
            .expect("delete must succeed");
        assert!(matches!(
            service.get_schedule(created.id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn create_schedule_for_unknown_user_is_not_found() {
        let (service, user_id) = service_and_user().await;
        let err = service
            .create_schedule(CreateScheduleRequest {
                user_id: user_id + 100,
                title: "Nope".to_string(),
                description: String::new(),
            })
            .await
            .expect_err("user must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_schedule_is_not_found() {
        let (service, _) = service_and_user().await;
        assert!(matches!(
            service.delete_schedule(77).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
