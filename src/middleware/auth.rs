//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Officer o super-admin: puede crear y modificar registros
    pub fn require_writer(&self) -> Result<(), AppError> {
        if !self.role.can_write_records() {
            return Err(AppError::Forbidden(
                "Se requiere un rol officer o super_admin".to_string(),
            ));
        }
        Ok(())
    }

    pub fn require_super_admin(&self) -> Result<(), AppError> {
        if !self.role.is_super_admin() {
            return Err(AppError::Forbidden(
                "Se requieren permisos de super-administrador".to_string(),
            ));
        }
        Ok(())
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // El usuario debe seguir existiendo; el rol se toma del registro, no del token
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
    };

    tracing::debug!("🔐 {} autenticado ({})", authenticated_user.email, authenticated_user.role.as_str());

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Middleware para rutas reservadas al super-admin (después de `auth_middleware`)
pub async fn super_admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    user.require_super_admin()?;
    Ok(next.run(request).await)
}
