mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn superuser_sees_counts_and_recent_zones() {
    let (app, state) = spawn_app().await;
    seed_zone(&state, 1, "alpha.example", 3).await;
    seed_zone(&state, 2, "beta.example", 3).await;
    seed_zone(&state, 3, "gamma.example", 4).await;
    register(&app, &Registration::new("carol")).await;

    let cookie = login_cookie(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let response = get_with_cookie(&app, "/api/admin/dashboard", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["view"], "dashboard");
    let data = &json["data"]["context"];
    assert_eq!(data["page_title"], "Dashboard");
    assert_eq!(data["total_zones"], 3);
    assert_eq!(data["total_records"], 10);
    assert_eq!(data["total_users"], 2);

    let recent: Vec<i64> = data["recent_zones"]
        .as_array()
        .unwrap()
        .iter()
        .map(|z| z["id"].as_i64().unwrap())
        .collect();
    assert_eq!(recent, vec![3, 2, 1]);
    assert_eq!(data["recent_zones"][0]["name"], "gamma.example");
    assert_eq!(data["recent_zones"][0]["type"], "NATIVE");
}

#[tokio::test]
async fn recent_zones_are_capped_at_five_newest() {
    let (app, state) = spawn_app().await;
    for id in 1..=7 {
        seed_zone(&state, id, &format!("zone{id}.example"), 0).await;
    }

    let cookie = login_cookie(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let response = get_with_cookie(&app, "/api/admin/dashboard", Some(&cookie)).await;
    let json = json_body(response).await;

    assert_eq!(json["data"]["context"]["total_zones"], 7);
    let recent: Vec<i64> = json["data"]["context"]["recent_zones"]
        .as_array()
        .unwrap()
        .iter()
        .map(|z| z["id"].as_i64().unwrap())
        .collect();
    assert_eq!(recent, vec![7, 6, 5, 4, 3]);
}

#[tokio::test]
async fn empty_installation_reports_zeroes() {
    let (app, _state) = spawn_app().await;

    let cookie = login_cookie(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let response = get_with_cookie(&app, "/api/admin/dashboard", Some(&cookie)).await;
    let json = json_body(response).await;

    assert_eq!(json["data"]["context"]["total_zones"], 0);
    assert_eq!(json["data"]["context"]["total_records"], 0);
    assert_eq!(json["data"]["context"]["total_users"], 1);
    assert_eq!(json["data"]["context"]["recent_zones"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn non_superuser_is_redirected_home() {
    let (app, state) = spawn_app().await;
    seed_zone(&state, 1, "alpha.example", 2).await;
    register(&app, &Registration::new("carol")).await;

    let cookie = login_cookie(&app, "carol", "correct horse").await;
    let response = get_with_cookie(&app, "/api/admin/dashboard", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    let body = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn anonymous_is_redirected_home() {
    let (app, _state) = spawn_app().await;

    let response = get_with_cookie(&app, "/api/admin/dashboard", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn deactivated_superuser_is_redirected_home() {
    use sea_orm::{ActiveModelTrait, Set};
    use zonepanel::entities::users;

    let (app, state) = spawn_app().await;
    let cookie = login_cookie(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    users::ActiveModel {
        id: Set(1),
        active: Set(false),
        ..Default::default()
    }
    .update(&state.store().conn)
    .await
    .unwrap();

    let response = get_with_cookie(&app, "/api/admin/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
