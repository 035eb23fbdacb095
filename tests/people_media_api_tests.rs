mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};

use common::TestApp;

fn person(national_id: &str, wanted: bool) -> Value {
    json!({
        "first_name": "Awa",
        "last_name": "Koné",
        "birth_date": "1990-05-04",
        "sex": "F",
        "national_id": national_id,
        "is_wanted": wanted
    })
}

const BOUNDARY: &str = "registry-test-boundary";

fn multipart_body(mime: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"alt\"\r\n\r\nPhoto d'identité\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"photo.png\"\r\n\
             Content-Type: {mime}\r\n\r\n",
            b = BOUNDARY,
            mime = mime
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn upload(app: &TestApp, token: &str, mime: &str, bytes: &[u8]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/media")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(mime, bytes)))
        .unwrap();
    let response = app.send(request).await;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_people_sorted_and_filtered() {
    let app = TestApp::new().await;

    for (id, wanted) in [("CI003", false), ("CI001", true), ("CI002", false)] {
        let (status, _) = app
            .json(Method::POST, "/api/people", Some(&app.officer_token), Some(person(id, wanted)))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, listed) = app.get("/api/people").await;
    let ids: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["national_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["CI001", "CI002", "CI003"]);

    let (_, wanted) = app.get("/api/people?is_wanted=true").await;
    assert_eq!(wanted.as_array().unwrap().len(), 1);

    let (status, _) = app
        .json(Method::POST, "/api/people", Some(&app.officer_token), Some(person("ci001", false)))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_person_delete_is_super_admin_only() {
    let app = TestApp::new().await;
    let (_, created) = app
        .json(Method::POST, "/api/people", Some(&app.officer_token), Some(person("CI001", false)))
        .await;
    let uri = format!("/api/people/{}", created["data"]["id"].as_str().unwrap());

    let (status, _) = app.json(Method::DELETE, &uri, Some(&app.officer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.json(Method::DELETE, &uri, Some(&app.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_media_upload_and_download() {
    let app = TestApp::new().await;
    let png = b"\x89PNG\r\n\x1a\nfake-image-bytes";

    let (status, uploaded) = upload(&app, &app.officer_token, "image/png", png).await;
    assert_eq!(status, StatusCode::OK, "{}", uploaded);
    let media = &uploaded["data"];
    assert_eq!(media["mime_type"], "image/png");
    assert_eq!(media["alt"], "Photo d'identité");
    assert_eq!(media["filesize"], png.len() as i64);
    assert_eq!(media["checksum"], format!("{:x}", md5::compute(png)));

    let file_url = media["url"].as_str().unwrap().to_string();
    let response = app
        .send(Request::builder().uri(&file_url).body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], &png[..]);

    // La persona puede referenciar la foto
    let mut body = person("CI001", false);
    body["photo_id"] = media["id"].clone();
    let (status, _) = app
        .json(Method::POST, "/api/people", Some(&app.officer_token), Some(body))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_media_rejects_non_images() {
    let app = TestApp::new().await;

    let (status, _) = upload(&app, &app.officer_token, "application/pdf", b"%PDF-1.4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = upload(&app, &app.viewer_token, "image/png", b"png").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_photo_rejected() {
    let app = TestApp::new().await;
    let mut body = person("CI001", false);
    body["photo_id"] = json!("00000000-0000-0000-0000-000000000000");

    let (status, _) = app
        .json(Method::POST, "/api/people", Some(&app.officer_token), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
