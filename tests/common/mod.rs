#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use vehicle_registry::config::EnvironmentConfig;
use vehicle_registry::create_router;
use vehicle_registry::models::user::{User, UserRole};
use vehicle_registry::state::AppState;
use vehicle_registry::utils::jwt::generate_token;

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub admin_token: String,
    pub officer_token: String,
    pub viewer_token: String,
    _media_dir: TempDir,
}

impl TestApp {
    /// Aplicación en memoria con un usuario de cada rol
    pub async fn new() -> Self {
        let media_dir = TempDir::new().unwrap();
        let config = EnvironmentConfig {
            media_dir: media_dir.path().to_path_buf(),
            max_upload_bytes: 1024,
            ..EnvironmentConfig::default()
        };
        let state = AppState::in_memory(config);

        let admin_token = seed_user(&state, "admin@police.ci", UserRole::SuperAdmin).await;
        let officer_token = seed_user(&state, "officer@police.ci", UserRole::Officer).await;
        let viewer_token = seed_user(&state, "viewer@police.ci", UserRole::Viewer).await;

        Self {
            router: create_router(state.clone()),
            state,
            admin_token,
            officer_token,
            viewer_token,
            _media_dir: media_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Petición JSON; devuelve el estado y el cuerpo decodificado
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.json(Method::GET, uri, None, None).await
    }

    pub async fn create_vehicle(&self, body: Value) -> Value {
        let (status, value) = self
            .json(Method::POST, "/api/vehicles", Some(&self.officer_token), Some(body))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", value);
        value["data"].clone()
    }

    pub async fn update_vehicle(&self, id: &str, body: Value) -> Value {
        let (status, value) = self
            .json(
                Method::PUT,
                &format!("/api/vehicles/{}", id),
                Some(&self.officer_token),
                Some(body),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", value);
        value["data"].clone()
    }

    pub async fn alerts_for_plate(&self, plate: &str) -> Vec<Value> {
        let (status, value) = self.get(&format!("/api/alerts?plate={}", plate)).await;
        assert_eq!(status, StatusCode::OK);
        value.as_array().cloned().unwrap_or_default()
    }
}

async fn seed_user(state: &AppState, email: &str, role: UserRole) -> String {
    let hash = bcrypt::hash(PASSWORD, 4).unwrap();
    let user = state.users.insert(&User::new(email.to_string(), hash, role)).await.unwrap();
    generate_token(user.id, &user.email, user.role, &state.jwt).unwrap()
}

/// Vehículo mínimo válido
pub fn vehicle_body(plate: &str, serial: &str) -> Value {
    json!({
        "plate_number": plate,
        "serial_number": serial,
        "vehicle_type": "car",
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2018,
        "color": "white"
    })
}

pub fn stolen(mut body: Value, theft_date: &str, place: &str) -> Value {
    body["status"] = json!("stolen");
    body["theft_info"] = json!({
        "theft_date": theft_date,
        "place": place,
        "city": "Abidjan",
        "declarant_name": "Koffi Yao"
    });
    body
}

pub fn recovered(mut body: Value, recovery_date: &str) -> Value {
    body["status"] = json!("recovered");
    body["recovery_info"] = json!({
        "recovery_date": recovery_date,
        "place": "Yopougon",
        "condition": "damaged"
    });
    body
}
