use axum::{
    extract::{Path, Query, State},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::person_controller::PersonController;
use crate::dto::person_dto::PersonRequest;
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::models::person::{Person, PersonFilters};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_person_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_people))
        .route("/:id", get(get_person));

    let protected = Router::new()
        .route("/", post(create_person))
        .route("/:id", put(update_person).delete(delete_person))
        .route_layer(from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

async fn list_people(
    State(state): State<AppState>,
    Query(filters): Query<PersonFilters>,
) -> Result<Json<Vec<Person>>, AppError> {
    let controller = PersonController::new(&state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Person>, AppError> {
    let controller = PersonController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_person(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<PersonRequest>,
) -> Result<Json<ApiResponse<Person>>, AppError> {
    let controller = PersonController::new(&state);
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn update_person(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<PersonRequest>,
) -> Result<Json<ApiResponse<Person>>, AppError> {
    let controller = PersonController::new(&state);
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_person(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = PersonController::new(&state);
    controller.delete(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Persona eliminada exitosamente"
    })))
}
