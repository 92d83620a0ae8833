use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::routes;
use crate::infrastructure::database::memory_pool;
use crate::infrastructure::session::SessionService;
use crate::presentation::AppState;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

async fn app() -> Router {
    let pool = memory_pool().await;
    let sessions = Arc::new(SessionService::new(SECRET, 3600, false));
    routes(AppState::new(pool, sessions))
}

struct Reply {
    status: StatusCode,
    set_cookie: Option<String>,
    body: Value,
}

impl Reply {
    /// `session=<token>` part of the Set-Cookie header, ready for a Cookie header.
    fn session_pair(&self) -> String {
        self.set_cookie
            .as_deref()
            .and_then(|raw| raw.split(';').next())
            .expect("response must set the session cookie")
            .to_string()
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request must build"),
        None => builder.body(Body::empty()).expect("request must build"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must be readable")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body must be json")
    };

    Reply {
        status,
        set_cookie,
        body,
    }
}

async fn register(app: &Router, username: &str, email: &str) -> Reply {
    send(
        app,
        Method::POST,
        "/api/v1/register",
        Some(json!({ "username": username, "email": email, "password": "correct horse" })),
        None,
    )
    .await
}

#[tokio::test]
async fn health_and_index_respond() {
    let app = app().await;

    let health = send(&app, Method::GET, "/healthz", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let index = send(&app, Method::GET, "/api/v1", None, None).await;
    assert_eq!(index.status, StatusCode::OK);
    assert_eq!(index.body["message"], "hello from api");
}

#[tokio::test]
async fn duplicate_registration_conflicts_and_keeps_one_user() {
    let app = app().await;

    let first = register(&app, "alice", "alice@example.com").await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.set_cookie.is_some());

    let second = register(&app, "alice", "alice@example.com").await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert!(second.body["error"].is_string());

    let users = send(&app, Method::GET, "/api/v1/get_all_users", None, None).await;
    assert_eq!(users.status, StatusCode::OK);
    assert_eq!(users.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = app().await;

    let reply = send(
        &app,
        Method::POST,
        "/api/v1/register",
        Some(json!({ "username": "alice", "email": "alice@example.com", "password": "short" })),
        None,
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.set_cookie.is_none());
}

#[tokio::test]
async fn login_returns_registered_id_and_hides_which_part_failed() {
    let app = app().await;
    let registered = register(&app, "alice", "alice@example.com").await;
    let user_id = registered.body["user_id"].clone();

    let ok = send(
        &app,
        Method::POST,
        "/api/v1/login",
        Some(json!({ "username": "alice", "password": "correct horse" })),
        None,
    )
    .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["user_id"], user_id);
    assert!(ok.set_cookie.is_some());

    let wrong_password = send(
        &app,
        Method::POST,
        "/api/v1/login",
        Some(json!({ "username": "alice", "password": "battery staple" })),
        None,
    )
    .await;
    let unknown_user = send(
        &app,
        Method::POST,
        "/api/v1/login",
        Some(json!({ "username": "mallory", "password": "battery staple" })),
        None,
    )
    .await;

    assert_eq!(wrong_password.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_user.status, StatusCode::NOT_FOUND);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert!(wrong_password.set_cookie.is_none());
}

#[tokio::test]
async fn long_cyrillic_username_can_log_in() {
    let app = app().await;
    let username = "д".repeat(40);

    let registered = register(&app, &username, "dasha@example.com").await;
    assert_eq!(registered.status, StatusCode::OK);

    let login = send(
        &app,
        Method::POST,
        "/api/v1/login",
        Some(json!({ "username": username, "password": "correct horse" })),
        None,
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user_id"], registered.body["user_id"]);
    assert!(login.set_cookie.is_some());
}

#[tokio::test]
async fn malformed_login_looks_like_wrong_password() {
    let app = app().await;
    register(&app, "alice", "alice@example.com").await;

    let wrong_password = send(
        &app,
        Method::POST,
        "/api/v1/login",
        Some(json!({ "username": "alice", "password": "battery staple" })),
        None,
    )
    .await;
    assert_eq!(wrong_password.status, StatusCode::NOT_FOUND);

    for payload in [
        json!({ "username": "alice", "password": "" }),
        json!({ "username": "a".repeat(65), "password": "correct horse" }),
        json!({ "username": "", "password": "correct horse" }),
    ] {
        let reply = send(&app, Method::POST, "/api/v1/login", Some(payload), None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.body, wrong_password.body);
        assert!(reply.set_cookie.is_none());
    }
}

#[tokio::test]
async fn padded_email_is_normalized_on_register_and_update() {
    let app = app().await;

    let registered = register(&app, "alice", "  Alice@Example.com ").await;
    assert_eq!(registered.status, StatusCode::OK);
    let user_id = registered.body["user_id"].as_i64().expect("user_id");

    let user = send(&app, Method::GET, &format!("/api/v1/get_user/{user_id}"), None, None).await;
    assert_eq!(user.body["email"], "alice@example.com");

    let updated = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/update_user/{user_id}"),
        Some(json!({ "username": " alice ", "email": " NEW@Example.com" })),
        None,
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["username"], "alice");
    assert_eq!(updated.body["email"], "new@example.com");

    let invalid = register(&app, "bob", "not-an-email").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn session_goes_anonymous_logged_in_then_orphaned() {
    let app = app().await;

    let anonymous = send(&app, Method::GET, "/api/v1/logged_in", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.body, json!({ "status": "anonymous" }));

    let registered = register(&app, "alice", "alice@example.com").await;
    let cookie = registered.session_pair();
    let user_id = registered.body["user_id"].as_i64().expect("user_id");

    let logged_in = send(&app, Method::GET, "/api/v1/logged_in", None, Some(&cookie)).await;
    assert_eq!(logged_in.body["status"], "logged_in");
    assert_eq!(logged_in.body["username"], "alice");
    // expiry slides on every check
    assert!(logged_in.set_cookie.is_some());

    let deleted = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/delete_user/{user_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let orphaned = send(&app, Method::GET, "/api/v1/logged_in", None, Some(&cookie)).await;
    assert_eq!(orphaned.body["status"], "orphaned");
    assert_eq!(orphaned.body["user_id"], user_id);
    assert!(orphaned.set_cookie.is_none());
}

#[tokio::test]
async fn tampered_cookie_is_anonymous() {
    let app = app().await;

    let reply = send(
        &app,
        Method::GET,
        "/api/v1/logged_in",
        None,
        Some("session=not-a-token"),
    )
    .await;

    assert_eq!(reply.body["status"], "anonymous");
}

#[tokio::test]
async fn logout_clears_session_cookie() {
    let app = app().await;
    let registered = register(&app, "alice", "alice@example.com").await;
    let cookie = registered.session_pair();

    let reply = send(&app, Method::POST, "/api/v1/logout", None, Some(&cookie)).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["message"], "logged out");
    let set_cookie = reply.set_cookie.expect("logout must reset the cookie");
    assert!(set_cookie.starts_with("session=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn blog_lifecycle_uses_full_view_and_overwrites_on_patch() {
    let app = app().await;
    let registered = register(&app, "alice", "alice@example.com").await;
    let user_id = registered.body["user_id"].as_i64().expect("user_id");

    let created = send(
        &app,
        Method::POST,
        "/api/v1/add_blog",
        Some(json!({ "user_id": user_id, "title": "First", "content": "Hello" })),
        None,
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let blog_id = created.body["id"].as_i64().expect("blog id");
    assert_eq!(created.body["user_id"], user_id);

    let patched = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/update_blog/{blog_id}"),
        Some(json!({ "content": "Rewritten" })),
        None,
    )
    .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["title"], Value::Null);
    assert_eq!(patched.body["content"], "Rewritten");

    let full = send(
        &app,
        Method::GET,
        &format!("/api/v1/get_blog/{blog_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(full.body["id"], blog_id);
    assert!(full.body["created_at"].is_string());

    let user = send(
        &app,
        Method::GET,
        &format!("/api/v1/get_user/{user_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(
        user.body["blogs"],
        json!([{ "title": null, "content": "Rewritten" }])
    );

    let deleted = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/delete_blog/{blog_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = send(
        &app,
        Method::GET,
        &format!("/api/v1/get_blog/{blog_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn records_for_missing_owner_or_id_are_not_found() {
    let app = app().await;

    let blog = send(
        &app,
        Method::POST,
        "/api/v1/add_blog",
        Some(json!({ "user_id": 42, "title": "Orphan", "content": "x" })),
        None,
    )
    .await;
    assert_eq!(blog.status, StatusCode::NOT_FOUND);

    let patch = send(
        &app,
        Method::PATCH,
        "/api/v1/update_schedule/7",
        Some(json!({ "title": "x", "description": "y" })),
        None,
    )
    .await;
    assert_eq!(patch.status, StatusCode::NOT_FOUND);

    let delete = send(&app, Method::DELETE, "/api/v1/delete_profile/7", None, None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let listing = send(&app, Method::GET, "/api/v1/get_user_blogs/42", None, None).await;
    assert_eq!(listing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_user_cascades_to_owned_records() {
    let app = app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let bob = register(&app, "bob", "bob@example.com").await;
    let alice_id = alice.body["user_id"].as_i64().expect("alice id");
    let bob_id = bob.body["user_id"].as_i64().expect("bob id");

    for user_id in [alice_id, bob_id] {
        let blog = send(
            &app,
            Method::POST,
            "/api/v1/add_blog",
            Some(json!({ "user_id": user_id, "title": "Blog", "content": "Text" })),
            None,
        )
        .await;
        assert_eq!(blog.status, StatusCode::CREATED);
    }
    let schedule = send(
        &app,
        Method::POST,
        "/api/v1/add_schedule",
        Some(json!({ "user_id": alice_id, "title": "Gym", "description": "Mon 7am" })),
        None,
    )
    .await;
    assert_eq!(schedule.status, StatusCode::CREATED);
    let profile = send(
        &app,
        Method::POST,
        "/api/v1/add_profile",
        Some(json!({ "user_id": alice_id, "state": "CA", "country": "US" })),
        None,
    )
    .await;
    assert_eq!(profile.status, StatusCode::CREATED);

    let second_profile = send(
        &app,
        Method::POST,
        "/api/v1/add_profile",
        Some(json!({ "user_id": alice_id })),
        None,
    )
    .await;
    assert_eq!(second_profile.status, StatusCode::CONFLICT);

    let deleted = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/delete_user/{alice_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["deleted_blogs"], 1);
    assert_eq!(deleted.body["deleted_schedules"], 1);
    assert_eq!(deleted.body["deleted_profiles"], 1);

    let blogs = send(&app, Method::GET, "/api/v1/get_all_blogs", None, None).await;
    let owners: Vec<i64> = blogs
        .body
        .as_array()
        .expect("blog list")
        .iter()
        .filter_map(|blog| blog["user_id"].as_i64())
        .collect();
    assert_eq!(owners, vec![bob_id]);

    let schedules = send(&app, Method::GET, "/api/v1/get_all_schedules", None, None).await;
    assert_eq!(schedules.body, json!([]));

    let again = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/delete_user/{alice_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_overwrites_details_and_rejects_taken_username() {
    let app = app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    register(&app, "bob", "bob@example.com").await;
    let alice_id = alice.body["user_id"].as_i64().expect("alice id");

    let updated = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/update_user/{alice_id}"),
        Some(json!({
            "username": "alice2",
            "email": "alice2@example.com",
            "state": "NY"
        })),
        None,
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["username"], "alice2");
    assert_eq!(updated.body["state"], "NY");
    assert_eq!(updated.body["country"], Value::Null);

    let taken = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/update_user/{alice_id}"),
        Some(json!({ "username": "bob", "email": "alice2@example.com" })),
        None,
    )
    .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
}
