//! Rutas de la API REST
//!
//! Lecturas públicas; las escrituras pasan por `auth_middleware` y los
//! controladores comprueban el rol.

pub mod alert_routes;
pub mod media_routes;
pub mod person_routes;
pub mod report_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::Router;

use crate::state::AppState;

/// Router montado bajo `/api`
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router(state.clone()))
        .nest("/alerts", alert_routes::create_alert_router(state.clone()))
        .nest("/people", person_routes::create_person_router(state.clone()))
        .nest("/media", media_routes::create_media_router(state.clone()))
        .nest("/users", user_routes::create_user_router(state))
}
