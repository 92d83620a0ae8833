use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::schedule::Schedule;

#[derive(Debug, Clone)]
pub(crate) struct NewSchedule {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) user_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct SchedulePatch {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
}

#[async_trait]
pub(crate) trait ScheduleRepository: Send + Sync {
    async fn create_schedule(&self, input: NewSchedule) -> Result<Schedule, DomainError>;
    async fn get_schedule(&self, id: i64) -> Result<Option<Schedule>, DomainError>;
    async fn list_schedules(&self) -> Result<Vec<Schedule>, DomainError>;
    async fn list_schedules_for_user(&self, user_id: i64) -> Result<Vec<Schedule>, DomainError>;
    async fn update_schedule(
        &self,
        id: i64,
        patch: SchedulePatch,
    ) -> Result<Option<Schedule>, DomainError>;
    async fn delete_schedule(&self, id: i64) -> Result<bool, DomainError>;
}
