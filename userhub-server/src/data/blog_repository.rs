use async_trait::async_trait;

use crate::domain::blog::Blog;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewBlog {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) user_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct BlogPatch {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[async_trait]
pub(crate) trait BlogRepository: Send + Sync {
    async fn create_blog(&self, input: NewBlog) -> Result<Blog, DomainError>;
    async fn get_blog(&self, id: i64) -> Result<Option<Blog>, DomainError>;
    async fn list_blogs(&self) -> Result<Vec<Blog>, DomainError>;
    async fn list_blogs_for_user(&self, user_id: i64) -> Result<Vec<Blog>, DomainError>;
    async fn update_blog(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, DomainError>;
    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError>;
}
