use axum::{
    extract::{Path, Query, State},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{AppendHistoryRequest, VehicleRequest, VehicleWriteResponse};
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::models::vehicle::{Vehicle, VehicleFilters};
use crate::routes::report_routes;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle));

    let protected = Router::new()
        .route("/", post(create_vehicle))
        .route("/:id", put(update_vehicle).delete(delete_vehicle))
        .route("/:id/history", post(append_history))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    public
        .merge(protected)
        .merge(report_routes::create_report_router(state))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<ApiResponse<VehicleWriteResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<ApiResponse<VehicleWriteResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn append_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<AppendHistoryRequest>,
) -> Result<Json<ApiResponse<VehicleWriteResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.append_history(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}
