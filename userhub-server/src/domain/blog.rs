use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::fields::{validate_positive_i64, validate_title};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Blog {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateBlogRequest {
    pub(crate) user_id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
}

impl CreateBlogRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_positive_i64("user_id", self.user_id)?;
        validate_title(Some(&self.title))?;
        Ok(self)
    }
}

/// Replaces both fields; `None` clears the column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateBlogRequest {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

impl UpdateBlogRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_title(self.title.as_deref())?;
        Ok(self)
    }
}

impl Blog {
    pub(crate) fn new(
        id: i64,
        title: Option<String>,
        content: Option<String>,
        user_id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("user_id", user_id)?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            title,
            content,
            user_id,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{Blog, CreateBlogRequest, DomainError, UpdateBlogRequest};

    #[test]
    fn create_blog_request_rejects_blank_title() {
        let req = CreateBlogRequest {
            user_id: 1,
            title: "   ".to_string(),
            content: "valid content".to_string(),
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_blog_request_rejects_non_positive_user() {
        let req = CreateBlogRequest {
            user_id: 0,
            title: "title".to_string(),
            content: "content".to_string(),
        };

        let err = req.validate().expect_err("user_id must be rejected");
        assert_validation_field(err, "user_id");
    }

    #[test]
    fn create_blog_request_keeps_values_verbatim() {
        let req = CreateBlogRequest {
            user_id: 3,
            title: "  title  ".to_string(),
            content: "  content  ".to_string(),
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "  title  ");
        assert_eq!(validated.content, "  content  ");
    }

    #[test]
    fn update_blog_request_allows_clearing_fields() {
        let req = UpdateBlogRequest {
            title: None,
            content: None,
        };
        let validated = req.validate().expect("must validate");
        assert!(validated.title.is_none());
        assert!(validated.content.is_none());
    }

    #[test]
    fn blog_new_rejects_updated_before_created() {
        let updated_at = Utc::now();
        let created_at = updated_at + Duration::seconds(1);

        let err = Blog::new(
            1,
            Some("Title".to_string()),
            None,
            10,
            created_at,
            updated_at,
        )
        .expect_err("updated_at < created_at must fail");
        assert_validation_field(err, "updated_at");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
