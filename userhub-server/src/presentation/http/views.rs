//! JSON shapes returned by the API.
//!
//! Blogs and schedules have two shapes: the full view returned by their own
//! endpoints, and a summary (title and text only) embedded in a user.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::user_service::UserDetails;
use crate::domain::blog::Blog;
use crate::domain::profile::Profile;
use crate::domain::schedule::Schedule;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserView {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) avatar: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) profile: Option<ProfileView>,
    pub(crate) blogs: Vec<BlogSummaryView>,
    pub(crate) schedules: Vec<ScheduleSummaryView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct BlogSummaryView {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct BlogFullView {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ScheduleSummaryView {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ScheduleFullView {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfileView {
    pub(crate) id: i64,
    pub(crate) state: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) user_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageView {
    pub(crate) message: String,
}

impl MessageView {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<UserDetails> for UserView {
    fn from(details: UserDetails) -> Self {
        let UserDetails {
            user,
            profile,
            blogs,
            schedules,
        } = details;
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            state: user.state,
            country: user.country,
            profile: profile.map(ProfileView::from),
            blogs: blogs.into_iter().map(BlogSummaryView::from).collect(),
            schedules: schedules
                .into_iter()
                .map(ScheduleSummaryView::from)
                .collect(),
        }
    }
}

impl From<Blog> for BlogSummaryView {
    fn from(blog: Blog) -> Self {
        Self {
            title: blog.title,
            content: blog.content,
        }
    }
}

impl From<Blog> for BlogFullView {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            user_id: blog.user_id,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

impl From<Schedule> for ScheduleSummaryView {
    fn from(schedule: Schedule) -> Self {
        Self {
            title: schedule.title,
            description: schedule.description,
        }
    }
}

impl From<Schedule> for ScheduleFullView {
    fn from(schedule: Schedule) -> Self {
        Self {
            id: schedule.id,
            title: schedule.title,
            description: schedule.description,
            user_id: schedule.user_id,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        }
    }
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            state: profile.state,
            country: profile.country,
            user_id: profile.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::{BlogFullView, UserView};
    use crate::application::user_service::UserDetails;
    use crate::domain::blog::Blog;
    use crate::domain::schedule::Schedule;
    use crate::domain::user::User;

    fn details() -> UserDetails {
        let now = Utc::now();
        UserDetails {
            user: User::new(3, "alice", "alice@example.com", now)
                .expect("valid user")
                .with_details(None, Some("NY".to_string()), Some("US".to_string())),
            profile: None,
            blogs: vec![
                Blog::new(
                    11,
                    Some("Hello".to_string()),
                    Some("World".to_string()),
                    3,
                    now,
                    now,
                )
                .expect("valid blog"),
            ],
            schedules: vec![
                Schedule::new(21, Some("Gym".to_string()), None, 3, now, now)
                    .expect("valid schedule"),
            ],
        }
    }

    #[test]
    fn user_view_embeds_summaries_without_ids() {
        let value = serde_json::to_value(UserView::from(details())).expect("serializable");

        assert_eq!(
            value["blogs"],
            json!([{ "title": "Hello", "content": "World" }])
        );
        assert_eq!(
            value["schedules"],
            json!([{ "title": "Gym", "description": null }])
        );
        assert_eq!(value["state"], "NY");
        assert!(value.get("password").is_none());
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn blog_full_view_carries_ids() {
        let mut details = details();
        let blog = details.blogs.remove(0);
        let value = serde_json::to_value(BlogFullView::from(blog)).expect("serializable");

        assert_eq!(value["id"], 11);
        assert_eq!(value["user_id"], 3);
        assert_eq!(value["title"], "Hello");
        assert_eq!(value["content"], "World");
        assert!(value.get("created_at").is_some());
    }
}
