use utoipa::OpenApi;

use crate::presentation::http::handlers::auth::{
    AuthMessageDto, LoginDto, RegisterDto, SessionState, SessionStatusDto,
};
use crate::presentation::http::handlers::blogs::{CreateBlogDto, UpdateBlogDto};
use crate::presentation::http::handlers::profiles::{CreateProfileDto, UpdateProfileDto};
use crate::presentation::http::handlers::schedules::{CreateScheduleDto, UpdateScheduleDto};
use crate::presentation::http::handlers::users::{DeleteUserResponseDto, UpdateUserDto};
use crate::presentation::http::views::{
    BlogFullView, BlogSummaryView, MessageView, ProfileView, ScheduleFullView,
    ScheduleSummaryView, UserView,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::auth::index,
        crate::presentation::http::handlers::auth::register,
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::auth::logged_in,
        crate::presentation::http::handlers::auth::logout,
        crate::presentation::http::handlers::users::list_users,
        crate::presentation::http::handlers::users::get_user,
        crate::presentation::http::handlers::users::update_user,
        crate::presentation::http::handlers::users::delete_user,
        crate::presentation::http::handlers::profiles::create_profile,
        crate::presentation::http::handlers::profiles::list_profiles,
        crate::presentation::http::handlers::profiles::get_profile,
        crate::presentation::http::handlers::profiles::update_profile,
        crate::presentation::http::handlers::profiles::delete_profile,
        crate::presentation::http::handlers::blogs::create_blog,
        crate::presentation::http::handlers::blogs::list_blogs,
        crate::presentation::http::handlers::blogs::list_user_blogs,
        crate::presentation::http::handlers::blogs::get_blog,
        crate::presentation::http::handlers::blogs::update_blog,
        crate::presentation::http::handlers::blogs::delete_blog,
        crate::presentation::http::handlers::schedules::create_schedule,
        crate::presentation::http::handlers::schedules::list_schedules,
        crate::presentation::http::handlers::schedules::list_user_schedules,
        crate::presentation::http::handlers::schedules::get_schedule,
        crate::presentation::http::handlers::schedules::update_schedule,
        crate::presentation::http::handlers::schedules::delete_schedule
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            AuthMessageDto,
            SessionState,
            SessionStatusDto,
            UpdateUserDto,
            DeleteUserResponseDto,
            CreateProfileDto,
            UpdateProfileDto,
            CreateBlogDto,
            UpdateBlogDto,
            CreateScheduleDto,
            UpdateScheduleDto,
            UserView,
            ProfileView,
            BlogSummaryView,
            BlogFullView,
            ScheduleSummaryView,
            ScheduleFullView,
            MessageView
        )
    ),
    tags(
        (name = "auth", description = "Registration and cookie session endpoints"),
        (name = "users", description = "User endpoints"),
        (name = "profiles", description = "Profile endpoints"),
        (name = "blogs", description = "Blog endpoints"),
        (name = "schedules", description = "Schedule endpoints")
    )
)]
pub(crate) struct ApiDoc;
