use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::data::user_repository::UserRepository;
use crate::domain::blog::{Blog, CreateBlogRequest, UpdateBlogRequest};
use crate::domain::error::DomainError;

pub(crate) struct BlogService<B: BlogRepository, U: UserRepository> {
    repo: B,
    users: U,
}

impl<B: BlogRepository, U: UserRepository> BlogService<B, U> {
    pub(crate) fn new(repo: B, users: U) -> Self {
        Self { repo, users }
    }

    pub(crate) async fn create_blog(&self, req: CreateBlogRequest) -> Result<Blog, DomainError> {
        let req = req.validate()?;
        self.ensure_user_exists(req.user_id).await?;

        let new_blog = NewBlog {
            title: req.title,
            content: req.content,
            user_id: req.user_id,
        };
        self.repo.create_blog(new_blog).await
    }

    pub(crate) async fn get_blog(&self, id: i64) -> Result<Blog, DomainError> {
        self.repo
            .get_blog(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("blog id: {id}")))
    }

    pub(crate) async fn list_blogs(&self) -> Result<Vec<Blog>, DomainError> {
        self.repo.list_blogs().await
    }

    pub(crate) async fn list_user_blogs(&self, user_id: i64) -> Result<Vec<Blog>, DomainError> {
        self.ensure_user_exists(user_id).await?;
        self.repo.list_blogs_for_user(user_id).await
    }

    pub(crate) async fn update_blog(
        &self,
        id: i64,
        req: UpdateBlogRequest,
    ) -> Result<Blog, DomainError> {
        let req = req.validate()?;
        let patch = BlogPatch {
            title: req.title,
            content: req.content,
        };
        self.repo
            .update_blog(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("blog id: {id}")))
    }

    pub(crate) async fn delete_blog(&self, id: i64) -> Result<(), DomainError> {
        let deleted = self.repo.delete_blog(id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("blog id: {id}")));
        }
        Ok(())
    }

    async fn ensure_user_exists(&self, user_id: i64) -> Result<(), DomainError> {
        match self.users.get_user(user_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("user id: {user_id}"))),
        }
    }
}
