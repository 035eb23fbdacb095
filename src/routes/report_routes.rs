//! Descarga de los PDF de un vehículo.
//!
//! Los errores de estas rutas usan el cuerpo `{ "error": "<mensaje>" }`.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::controllers::report_controller::{ReportController, ReportFile};
use crate::middleware::auth_middleware;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_report_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/generate-pdf/:id", get(vehicle_sheet))
        .route("/generate-vol-pdf/:id", get(theft_declaration))
        .route("/generate-historique-pdf/:id/:index", get(history_entry))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn vehicle_sheet(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let controller = ReportController::new(&state);
    respond(controller.vehicle_sheet(&id).await)
}

async fn theft_declaration(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let controller = ReportController::new(&state);
    respond(controller.theft_declaration(&id).await)
}

async fn history_entry(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, String)>,
) -> Response {
    let controller = ReportController::new(&state);
    respond(controller.history_entry(&id, &index).await)
}

fn respond(result: AppResult<ReportFile>) -> Response {
    match result.and_then(pdf_response) {
        Ok(response) => response,
        Err(e) => error_response(e),
    }
}

fn pdf_response(file: ReportFile) -> AppResult<Response> {
    let disposition = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        file.filename,
        urlencoding::encode(&file.filename)
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, file.bytes.len().to_string())
        .body(Body::from(file.bytes))
        .map_err(|e| AppError::Report(e.to_string()))
}

fn error_response(error: AppError) -> Response {
    let status = error.status_code();
    let message = match &error {
        AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
        AppError::Unauthorized(msg) | AppError::Forbidden(msg) => msg.clone(),
        AppError::Report(msg) => {
            tracing::error!("❌ Error generando el PDF: {}", msg);
            format!("Erreur lors de la génération du PDF: {}", msg)
        }
        other => {
            tracing::error!("❌ Error generando el PDF: {}", other);
            "Erreur lors de la génération du PDF".to_string()
        }
    };

    (status, Json(json!({ "error": message }))).into_response()
}
