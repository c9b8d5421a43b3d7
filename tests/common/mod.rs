#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, QueryFilter, Set};
use std::sync::Arc;
use tower::ServiceExt;
use zonepanel::api::AppState;
use zonepanel::config::Config;
use zonepanel::domain::TemplateId;
use zonepanel::entities::{domains, perm_templ, perm_templ_items, records};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "password";

/// Templates present on every freshly migrated database.
pub const ZONE_MANAGER_TEMPLATE: i32 = 2;
pub const READ_ONLY_TEMPLATE: i32 = 3;

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.server.secure_cookies = false;
    // Minimum-cost Argon2 for tests.
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

pub async fn spawn_app_with(config: Config) -> (Router, Arc<AppState>) {
    let state = zonepanel::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let app = zonepanel::api::router(state.clone()).await;
    (app, state)
}

pub async fn spawn_app() -> (Router, Arc<AppState>) {
    spawn_app_with(test_config()).await
}

/// `id=...` pair from the `set-cookie` header, if the response set one.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Renders the registration form and returns the session cookie and its token.
pub async fn fetch_register_form(app: &Router) -> (String, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/register")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let cookie = session_cookie(&response).expect("session cookie");
    let json = json_body(response).await;
    let token = json["data"]["context"]["csrf_token"]
        .as_str()
        .expect("csrf token")
        .to_string();

    (cookie, token)
}

pub fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect()
}

pub struct Registration<'a> {
    pub username: &'a str,
    pub fullname: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirm: &'a str,
}

impl<'a> Registration<'a> {
    pub const fn new(username: &'a str) -> Self {
        Self {
            username,
            fullname: "Test User",
            email: "user@example.net",
            password: "correct horse",
            password_confirm: "correct horse",
        }
    }

    pub fn form_body(&self, token: &str) -> String {
        format!(
            "username={}&fullname={}&email={}&password={}&password_confirm={}&csrf_token={}",
            encode(self.username),
            encode(self.fullname),
            encode(self.email),
            encode(self.password),
            encode(self.password_confirm),
            encode(token),
        )
    }
}

pub async fn post_register(app: &Router, cookie: Option<&str>, body: String) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header(
            header::CONTENT_TYPE,
            mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(),
        );
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Registers through the public form and asserts the redirect.
pub async fn register(app: &Router, registration: &Registration<'_>) {
    let (cookie, token) = fetch_register_form(app).await;
    let response = post_register(app, Some(&cookie), registration.form_body(&token)).await;
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
}

/// Posts credentials to the login endpoint.
pub async fn login(app: &Router, username: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(
                    serde_json::json!({ "username": username, "password": password })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn login_cookie(app: &Router, username: &str, password: &str) -> String {
    let response = login(app, username, password).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    session_cookie(&response).expect("login sets a session cookie")
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn seed_template(state: &AppState, name: &str) -> TemplateId {
    let template = perm_templ::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        descr: Set(format!("{name} template")),
    }
    .insert(&state.store().conn)
    .await
    .expect("seed template");

    TemplateId::new(template.id)
}

/// Deletes a seeded template together with its item links.
pub async fn remove_template(state: &AppState, id: i32) {
    let conn = &state.store().conn;
    perm_templ_items::Entity::delete_many()
        .filter(perm_templ_items::Column::TemplId.eq(id))
        .exec(conn)
        .await
        .expect("remove template items");
    perm_templ::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .expect("remove template");
}

pub async fn seed_zone(state: &AppState, id: i32, name: &str, record_count: usize) {
    domains::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        master: Set(None),
        last_check: Set(None),
        zone_type: Set("NATIVE".to_string()),
        notified_serial: Set(None),
        account: Set(None),
    }
    .insert(&state.store().conn)
    .await
    .expect("seed zone");

    for n in 0..record_count {
        records::ActiveModel {
            domain_id: Set(id),
            name: Set(format!("host{n}.{name}")),
            record_type: Set("A".to_string()),
            content: Set(format!("192.0.2.{n}")),
            ttl: Set(3600),
            prio: Set(0),
            disabled: Set(false),
            ..Default::default()
        }
        .insert(&state.store().conn)
        .await
        .expect("seed record");
    }
}
