mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, PASSWORD};

#[tokio::test]
async fn test_login_and_me() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "officer@police.ci", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "officer");
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().unwrap().to_string();
    let (status, me) = app.json(Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "officer@police.ci");
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let app = TestApp::new().await;

    let (status, _) = app
        .json(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "officer@police.ci", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_listing_requires_authentication() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/users").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, users) = app.json(Method::GET, "/api/users", Some(&app.viewer_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_user_management_is_super_admin_only() {
    let app = TestApp::new().await;
    let new_user = json!({ "email": "New.Agent@Police.ci", "password": "long-enough", "role": "officer" });

    let (status, _) = app
        .json(Method::POST, "/api/users", Some(&app.officer_token), Some(new_user.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = app
        .json(Method::POST, "/api/users", Some(&app.admin_token), Some(new_user.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["data"]["email"], "new.agent@police.ci");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .json(Method::POST, "/api/users", Some(&app.admin_token), Some(new_user))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = app
        .json(
            Method::PUT,
            &format!("/api/users/{}", id),
            Some(&app.admin_token),
            Some(json!({ "role": "viewer" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["role"], "viewer");

    let (status, _) = app
        .json(Method::DELETE, &format!("/api/users/{}", id), Some(&app.admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bootstrap_admin_only_when_empty() {
    let app = TestApp::new().await;

    let created = app
        .state
        .auth
        .bootstrap_admin(Some("root@police.ci"), Some("bootstrap-pass"))
        .await
        .unwrap();
    assert!(created.is_none());
}
