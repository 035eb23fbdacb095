//! Servicio de autenticación
//!
//! Login con bcrypt + JWT y creación del super-admin inicial.

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::models::user::{User, UserRole};
use crate::repositories::UserStore;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

/// Hashear una contraseña con bcrypt
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))
}

/// Verificar una contraseña contra su hash bcrypt
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    verify(password, password_hash).map_err(|e| AppError::Hash(e.to_string()))
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    /// Autenticar por email y contraseña; devuelve el token y el usuario
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        tracing::info!("🔐 Autenticando usuario: {}", email);

        let invalid = || AppError::Unauthorized("Credenciales inválidas".to_string());

        let user = self.users.find_by_email(email.trim()).await?.ok_or_else(invalid)?;
        if !verify_password(password, &user.password_hash)? {
            tracing::warn!("⚠️ Contraseña incorrecta para {}", email);
            return Err(invalid());
        }

        let token = generate_token(user.id, &user.email, user.role, &self.jwt)?;
        tracing::info!("✅ Autenticación exitosa para: {}", user.email);
        Ok((token, user))
    }

    pub fn token_lifetime(&self) -> u64 {
        self.jwt.expiration
    }

    /// Crea el super-admin inicial si la tabla de usuarios está vacía
    pub async fn bootstrap_admin(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> AppResult<Option<User>> {
        if self.users.count().await? > 0 {
            return Ok(None);
        }

        let (email, password) = match (email, password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                (email.trim().to_lowercase(), password)
            }
            _ => {
                tracing::warn!("⚠️ Sin usuarios y sin ADMIN_EMAIL/ADMIN_PASSWORD: nadie podrá iniciar sesión");
                return Ok(None);
            }
        };

        let admin = User::new(email, hash_password(password)?, UserRole::SuperAdmin);
        let admin = self.users.insert(&admin).await?;
        tracing::info!("👑 Super-admin inicial creado: {}", admin.email);
        Ok(Some(admin))
    }
}
