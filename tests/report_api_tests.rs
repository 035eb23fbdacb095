mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};

use common::{stolen, vehicle_body, TestApp};

const VIN: &str = "1HGCM82633A004352";

async fn download(app: &TestApp, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", app.viewer_token))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    let status = response.status();
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    (status, disposition, bytes)
}

fn error_message(bytes: &[u8]) -> String {
    let body: Value = serde_json::from_slice(bytes).unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_vehicle_sheet_pdf() {
    let app = TestApp::new().await;
    let created = app.create_vehicle(vehicle_body("AB-123-CD", VIN)).await;
    let id = created["vehicle"]["id"].as_str().unwrap();

    let (status, disposition, bytes) = download(&app, &format!("/api/vehicles/generate-pdf/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"%PDF"));
    let disposition = disposition.unwrap();
    assert!(disposition.starts_with("attachment; filename=\"fiche-vehicule-AB-123-CD.pdf\""));
    assert!(disposition.contains("filename*=UTF-8''fiche-vehicule-AB-123-CD.pdf"));
}

#[tokio::test]
async fn test_theft_declaration_requires_theft_info() {
    let app = TestApp::new().await;
    let created = app.create_vehicle(vehicle_body("AB-123-CD", VIN)).await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/vehicles/generate-vol-pdf/{}", id);

    let (status, _, bytes) = download(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!error_message(&bytes).is_empty());

    app.update_vehicle(&id, stolen(vehicle_body("AB-123-CD", VIN), "2024-01-10", "Abidjan"))
        .await;

    let (status, disposition, bytes) = download(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"%PDF"));
    assert!(disposition.unwrap().contains("declaration-vol-AB-123-CD.pdf"));
}

#[tokio::test]
async fn test_history_pdf_index_handling() {
    let app = TestApp::new().await;
    let created = app.create_vehicle(vehicle_body("AB-123-CD", VIN)).await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();

    for bad in ["abc", "-1"] {
        let (status, _, bytes) =
            download(&app, &format!("/api/vehicles/generate-historique-pdf/{}/{}", id, bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!error_message(&bytes).is_empty());
    }

    let (status, _, _) =
        download(&app, &format!("/api/vehicles/generate-historique-pdf/{}/0", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .json(
            Method::POST,
            &format!("/api/vehicles/{}/history", id),
            Some(&app.officer_token),
            Some(json!({
                "change_type": "plate_change",
                "change_date": "2024-05-02",
                "new_plate": "ZZ-999-YY"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, disposition, bytes) =
        download(&app, &format!("/api/vehicles/generate-historique-pdf/{}/0", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"%PDF"));
    assert!(disposition.unwrap().contains("changement-ZZ-999-YY-1.pdf"));
}

#[tokio::test]
async fn test_unknown_or_invalid_vehicle() {
    let app = TestApp::new().await;

    let (status, _, bytes) = download(
        &app,
        "/api/vehicles/generate-pdf/00000000-0000-0000-0000-000000000000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!error_message(&bytes).is_empty());

    let (status, _, _) = download(&app, "/api/vehicles/generate-pdf/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reports_require_authentication() {
    let app = TestApp::new().await;
    let created = app.create_vehicle(vehicle_body("AB-123-CD", VIN)).await;
    let id = created["vehicle"]["id"].as_str().unwrap();

    let (status, _) = app.get(&format!("/api/vehicles/generate-pdf/{}", id)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
