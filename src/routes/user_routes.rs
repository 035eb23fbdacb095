use axum::{
    extract::{Path, State},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::dto::auth_dto::{CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest};
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, super_admin_only_middleware, AuthenticatedUser};
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/login", post(login));

    let authenticated = Router::new()
        .route("/me", get(me))
        .route("/", get(list_users))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let admin = Router::new()
        .route("/", post(create_user))
        .route("/:id", put(update_user).delete(delete_user))
        .route_layer(from_fn(super_admin_only_middleware))
        .route_layer(from_fn_with_state(state, auth_middleware));

    public.merge(authenticated).merge(admin)
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<User>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.me(&user).await?;
    Ok(Json(response))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = UserController::new(&state);
    controller.delete(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Usuario eliminado exitosamente"
    })))
}
