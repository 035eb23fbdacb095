use axum::{
    extract::{Path, Query, State},
    middleware::from_fn_with_state,
    routing::{delete, get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::alert_controller::AlertController;
use crate::dto::alert_dto::UpdateAlertStatusRequest;
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, super_admin_only_middleware, AuthenticatedUser};
use crate::models::alert::{AlertFilters, SearchAlert};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_alert_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_alerts))
        .route("/:id", get(get_alert));

    let admin = Router::new()
        .route("/:id/status", patch(update_alert_status))
        .route("/:id", delete(delete_alert))
        .route_layer(axum::middleware::from_fn(super_admin_only_middleware))
        .route_layer(from_fn_with_state(state, auth_middleware));

    public.merge(admin)
}

async fn list_alerts(
    State(state): State<AppState>,
    Query(filters): Query<AlertFilters>,
) -> Result<Json<Vec<SearchAlert>>, AppError> {
    let controller = AlertController::new(&state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SearchAlert>, AppError> {
    let controller = AlertController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_alert_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAlertStatusRequest>,
) -> Result<Json<ApiResponse<SearchAlert>>, AppError> {
    let controller = AlertController::new(&state);
    let response = controller.update_status(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_alert(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = AlertController::new(&state);
    controller.delete(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Avis de recherche eliminado exitosamente"
    })))
}
