mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{recovered, stolen, vehicle_body, TestApp};

const VIN: &str = "1HGCM82633A004352";
const OTHER_VIN: &str = "JH4KA9650MC012345";

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_stolen_then_recovered_scenario() {
    let app = TestApp::new().await;

    let created = app.create_vehicle(vehicle_body("AB-123-CD", VIN)).await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["alert_sync"], json!([]));
    assert!(app.alerts_for_plate("AB-123-CD").await.is_empty());

    let body = stolen(vehicle_body("AB-123-CD", VIN), "2024-01-10", "Abidjan");
    let updated = app.update_vehicle(&id, body.clone()).await;
    assert_eq!(updated["alert_sync"][0]["outcome"], "alert_created");

    let alerts = app.alerts_for_plate("AB-123-CD").await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["plate_number"], "AB-123-CD");
    assert_eq!(alerts[0]["search_status"], "active");
    assert_eq!(alerts[0]["theft_date"], "2024-01-10");
    assert_eq!(alerts[0]["theft_place"], "Abidjan");
    assert_eq!(alerts[0]["brand"], "Toyota");
    assert_eq!(alerts[0]["vehicle_id"], id.as_str());

    let updated = app.update_vehicle(&id, recovered(body, "2024-02-01")).await;
    assert_eq!(updated["alert_sync"][0]["outcome"], "alert_found");
    assert!(updated["vehicle"]["recovery_info"]["recovered_by"].is_string());

    let alerts = app.alerts_for_plate("AB-123-CD").await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["search_status"], "found");
    assert_eq!(alerts[0]["recovery_date"], "2024-02-01");
    assert_eq!(alerts[0]["recovery_place"], "Yopougon");
}

#[tokio::test]
async fn test_create_stolen_yields_one_active_alert() {
    let app = TestApp::new().await;

    let body = stolen(vehicle_body("CD-456-EF", VIN), "2024-03-05", "Cocody");
    let created = app.create_vehicle(body.clone()).await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["alert_sync"][0]["outcome"], "alert_created");
    assert!(created["vehicle"]["theft_info"]["filed_by"].is_string());
    assert!(created["vehicle"]["theft_info"]["filed_at"].is_string());

    // Segunda escritura en estado stolen: ningún avis nuevo
    let updated = app.update_vehicle(&id, body).await;
    assert_eq!(updated["alert_sync"], json!([]));

    let alerts = app.alerts_for_plate("CD-456-EF").await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["search_status"], "active");
}

#[tokio::test]
async fn test_redeclaration_reactivates_existing_alert() {
    let app = TestApp::new().await;

    let body = stolen(vehicle_body("EF-789-GH", VIN), "2024-01-10", "Abidjan");
    let created = app.create_vehicle(body.clone()).await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();
    let first_alert_id = created["alert_sync"][0]["alert_id"].clone();

    app.update_vehicle(&id, recovered(body, "2024-02-01")).await;

    let body = stolen(vehicle_body("EF-789-GH", VIN), "2024-06-15", "Bouaké");
    let updated = app.update_vehicle(&id, body).await;
    assert_eq!(updated["alert_sync"][0]["outcome"], "alert_reactivated");
    assert_eq!(updated["alert_sync"][0]["alert_id"], first_alert_id);
    assert!(updated["vehicle"]["recovery_info"].is_null());

    let alerts = app.alerts_for_plate("EF-789-GH").await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["search_status"], "active");
    assert_eq!(alerts[0]["theft_date"], "2024-06-15");
    assert_eq!(alerts[0]["theft_place"], "Bouaké");
    assert!(alerts[0]["recovery_date"].is_null());
}

#[tokio::test]
async fn test_recovery_without_alert_is_noop() {
    let app = TestApp::new().await;

    let created = app.create_vehicle(vehicle_body("GH-321-IJ", VIN)).await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();

    let updated = app
        .update_vehicle(&id, recovered(vehicle_body("GH-321-IJ", VIN), "2024-02-01"))
        .await;
    assert_eq!(updated["alert_sync"][0]["outcome"], "recovery_without_active_alert");
    assert!(app.alerts_for_plate("GH-321-IJ").await.is_empty());
}

#[tokio::test]
async fn test_recovery_does_not_retrigger() {
    let app = TestApp::new().await;

    let body = stolen(vehicle_body("IJ-654-KL", VIN), "2024-01-10", "Abidjan");
    let created = app.create_vehicle(body.clone()).await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();

    let body = recovered(body, "2024-02-01");
    let first = app.update_vehicle(&id, body.clone()).await;
    assert_eq!(first["alert_sync"][0]["outcome"], "alert_found");

    let second = app.update_vehicle(&id, body).await;
    assert_eq!(second["alert_sync"], json!([]));
}

#[tokio::test]
async fn test_withdrawal_abandons_alert() {
    let app = TestApp::new().await;

    let created = app
        .create_vehicle(stolen(vehicle_body("KL-987-MN", VIN), "2024-01-10", "Abidjan"))
        .await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();

    let updated = app.update_vehicle(&id, vehicle_body("KL-987-MN", VIN)).await;
    assert_eq!(updated["alert_sync"][0]["outcome"], "alert_abandoned");
    assert!(updated["vehicle"]["theft_info"].is_null());

    let alerts = app.alerts_for_plate("KL-987-MN").await;
    assert_eq!(alerts[0]["search_status"], "abandoned");
}

#[tokio::test]
async fn test_plate_is_normalized() {
    let app = TestApp::new().await;

    let created = app.create_vehicle(vehicle_body("  ab-123-cd ", VIN)).await;
    assert_eq!(created["vehicle"]["plate_number"], "AB-123-CD");
    assert_eq!(created["vehicle"]["currency"], "XOF");
}

#[tokio::test]
async fn test_duplicate_plate_conflicts() {
    let app = TestApp::new().await;
    app.create_vehicle(vehicle_body("AB-123-CD", VIN)).await;

    let (status, _) = app
        .json(
            Method::POST,
            "/api/vehicles",
            Some(&app.officer_token),
            Some(vehicle_body("ab-123-cd", OTHER_VIN)),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_payloads_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/vehicles",
            Some(&app.officer_token),
            Some(vehicle_body("AB-12-CD", VIN)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["plate_number"].is_array());

    let mut missing_theft = vehicle_body("AB-123-CD", VIN);
    missing_theft["status"] = json!("stolen");
    let (status, body) = app
        .json(Method::POST, "/api/vehicles", Some(&app.officer_token), Some(missing_theft))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["theft_info"].is_array());
}

#[tokio::test]
async fn test_write_access_rules() {
    let app = TestApp::new().await;

    let (status, _) = app
        .json(Method::POST, "/api/vehicles", None, Some(vehicle_body("AB-123-CD", VIN)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .json(
            Method::POST,
            "/api/vehicles",
            Some(&app.viewer_token),
            Some(vehicle_body("AB-123-CD", VIN)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .json(Method::POST, "/api/vehicles", Some("not-a-token"), Some(vehicle_body("AB-123-CD", VIN)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Lecturas públicas
    let (status, _) = app.get("/api/vehicles").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_history_append_stamps_entries() {
    let app = TestApp::new().await;

    let created = app.create_vehicle(vehicle_body("AB-123-CD", VIN)).await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/vehicles/{}/history", id);

    let (status, first) = app
        .json(
            Method::POST,
            &uri,
            Some(&app.officer_token),
            Some(json!({
                "change_type": "plate_change",
                "change_date": "2024-05-02",
                "previous_plate": "ab-123-cd",
                "new_plate": "zz-999-yy",
                "reason": "Nouvelle série"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", first);
    let vehicle = &first["data"]["vehicle"];
    assert_eq!(vehicle["plate_number"], "ZZ-999-YY");
    let entry = &vehicle["change_history"][0];
    assert_eq!(entry["previous_plate"], "AB-123-CD");
    assert_eq!(entry["new_plate"], "ZZ-999-YY");
    assert!(entry["entered_by"].is_string());
    assert!(entry["entered_at"].is_string());

    // previous_plate ya no coincide
    let (status, _) = app
        .json(
            Method::POST,
            &uri,
            Some(&app.officer_token),
            Some(json!({
                "change_type": "plate_change",
                "change_date": "2024-06-01",
                "previous_plate": "AB-123-CD",
                "new_plate": "AA-111-AA"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, person) = app
        .json(
            Method::POST,
            "/api/people",
            Some(&app.officer_token),
            Some(json!({
                "first_name": "Awa",
                "last_name": "Koné",
                "birth_date": "1990-05-04",
                "national_id": "CI0012345"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let owner_id = person["data"]["id"].as_str().unwrap().to_string();

    let (status, second) = app
        .json(
            Method::POST,
            &uri,
            Some(&app.officer_token),
            Some(json!({
                "change_type": "ownership_change",
                "change_date": "2024-07-01",
                "new_owner_id": owner_id
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let vehicle = &second["data"]["vehicle"];
    assert_eq!(vehicle["owner_id"], owner_id.as_str());
    assert_eq!(vehicle["change_history"].as_array().unwrap().len(), 2);
    assert_eq!(vehicle["change_history"][0], first["data"]["vehicle"]["change_history"][0]);

    // PUT no toca el historial
    let updated = app.update_vehicle(&id, vehicle_body("ZZ-999-YY", VIN)).await;
    assert_eq!(updated["vehicle"]["change_history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_requires_super_admin_and_removes_alert() {
    let app = TestApp::new().await;

    let created = app
        .create_vehicle(stolen(vehicle_body("AB-123-CD", VIN), "2024-01-10", "Abidjan"))
        .await;
    let uri = format!("/api/vehicles/{}", created["vehicle"]["id"].as_str().unwrap());

    let (status, _) = app.json(Method::DELETE, &uri, Some(&app.officer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.json(Method::DELETE, &uri, Some(&app.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.alerts_for_plate("AB-123-CD").await.is_empty());
}

#[tokio::test]
async fn test_alert_status_manual_update() {
    let app = TestApp::new().await;

    let created = app
        .create_vehicle(stolen(vehicle_body("AB-123-CD", VIN), "2024-01-10", "Abidjan"))
        .await;
    let alert_id = created["alert_sync"][0]["alert_id"].as_str().unwrap().to_string();
    let uri = format!("/api/alerts/{}/status", alert_id);
    let body = json!({ "search_status": "abandoned" });

    let (status, _) = app
        .json(Method::PATCH, &uri, Some(&app.officer_token), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app.json(Method::PATCH, &uri, Some(&app.admin_token), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["search_status"], "abandoned");

    let (status, listed) = app.get("/api/alerts?status=abandoned").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_plate_change_moves_active_alert() {
    let app = TestApp::new().await;

    let first = app
        .create_vehicle(stolen(vehicle_body("AB-123-CD", VIN), "2024-01-10", "Abidjan"))
        .await;
    let first_id = first["vehicle"]["id"].as_str().unwrap().to_string();

    let (status, changed) = app
        .json(
            Method::POST,
            &format!("/api/vehicles/{}/history", first_id),
            Some(&app.officer_token),
            Some(json!({
                "change_type": "plate_change",
                "change_date": "2024-03-01",
                "new_plate": "ZZ-999-ZZ"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", changed);
    assert_eq!(changed["data"]["alert_sync"][0]["outcome"], "alert_plate_refreshed");

    let alerts = app.alerts_for_plate("ZZ-999-ZZ").await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["search_status"], "active");
    assert_eq!(alerts[0]["vehicle_id"], first_id.as_str());
    assert!(app.alerts_for_plate("AB-123-CD").await.is_empty());

    // Otro vehículo robado con la placa liberada recibe su propio avis
    let second = app
        .create_vehicle(stolen(vehicle_body("AB-123-CD", OTHER_VIN), "2024-04-02", "Cocody"))
        .await;
    assert_eq!(second["alert_sync"][0]["outcome"], "alert_created");

    let alerts = app.alerts_for_plate("AB-123-CD").await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["vehicle_id"], second["vehicle"]["id"]);
}

#[tokio::test]
async fn test_manual_alert_status_must_match_vehicle() {
    let app = TestApp::new().await;

    let body = stolen(vehicle_body("AB-123-CD", VIN), "2024-01-10", "Abidjan");
    let created = app.create_vehicle(body.clone()).await;
    let id = created["vehicle"]["id"].as_str().unwrap().to_string();
    let alert_id = created["alert_sync"][0]["alert_id"].as_str().unwrap().to_string();
    let uri = format!("/api/alerts/{}/status", alert_id);
    let patch = |status: &str| json!({ "search_status": status });

    // Vehículo aún robado: no se puede cerrar como encontrado
    let (status, _) = app
        .json(Method::PATCH, &uri, Some(&app.admin_token), Some(patch("found")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let updated = app.update_vehicle(&id, recovered(body, "2024-02-01")).await;
    assert_eq!(updated["alert_sync"][0]["outcome"], "alert_found");

    // Vehículo recuperado: no se puede reactivar
    let (status, _) = app
        .json(Method::PATCH, &uri, Some(&app.admin_token), Some(patch("active")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .json(Method::PATCH, &uri, Some(&app.admin_token), Some(patch("abandoned")))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, found) = app
        .json(Method::PATCH, &uri, Some(&app.admin_token), Some(patch("found")))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", found);
    assert_eq!(found["data"]["search_status"], "found");
    assert_eq!(found["data"]["recovery_date"], "2024-02-01");
    assert_eq!(found["data"]["recovery_place"], "Yopougon");
    assert!(found["data"]["recovered_by"].is_string());
}
