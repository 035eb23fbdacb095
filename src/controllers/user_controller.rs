use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::user::User;
use crate::repositories::UserStore;
use crate::services::auth_service::hash_password;
use crate::services::AuthService;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct UserController {
    users: Arc<dyn UserStore>,
    auth: AuthService,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            auth: state.auth.clone(),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let (token, user) = self.auth.login(&request.email, &request.password).await?;
        Ok(LoginResponse::bearer(token, self.auth.token_lifetime(), user))
    }

    pub async fn me(&self, actor: &AuthenticatedUser) -> AppResult<User> {
        self.get_by_id(actor.user_id).await
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", &id.to_string()))
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> AppResult<ApiResponse<User>> {
        actor.require_super_admin()?;
        request.validate()?;

        let user = User::new(
            request.email.trim().to_lowercase(),
            hash_password(&request.password)?,
            request.role,
        );
        let saved = self.users.insert(&user).await?;

        tracing::info!("👤 Usuario {} creado ({})", saved.email, saved.role.as_str());
        Ok(ApiResponse::success_with_message(saved, "Usuario creado exitosamente"))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> AppResult<ApiResponse<User>> {
        actor.require_super_admin()?;
        request.validate()?;

        let mut user = self.get_by_id(id).await?;
        if let Some(email) = request.email {
            user.email = email.trim().to_lowercase();
        }
        if let Some(password) = request.password {
            user.password_hash = hash_password(&password)?;
        }
        if let Some(role) = request.role {
            if id == actor.user_id && !role.is_super_admin() {
                return Err(AppError::BadRequest(
                    "Un super-administrador no puede retirarse su propio rol".to_string(),
                ));
            }
            user.role = role;
        }
        user.updated_at = Utc::now();

        let saved = self.users.update(&user).await?;
        Ok(ApiResponse::success_with_message(saved, "Usuario actualizado exitosamente"))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<()> {
        actor.require_super_admin()?;

        if id == actor.user_id {
            return Err(AppError::BadRequest(
                "No se puede eliminar la propia cuenta".to_string(),
            ));
        }
        if !self.users.delete(id).await? {
            return Err(not_found_error("User", &id.to_string()));
        }

        tracing::info!("🗑️ Usuario {} eliminado por {}", id, actor.email);
        Ok(())
    }
}
