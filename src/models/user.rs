//! Modelo de User
//!
//! Usuarios del back-office con su rol (super-admin, officer, viewer).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol del usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Officer,
    Viewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Officer => "officer",
            UserRole::Viewer => "viewer",
        }
    }

    /// Puede crear y modificar registros (vehículos, personas, medios)
    pub fn can_write_records(&self) -> bool {
        matches!(self, UserRole::SuperAdmin | UserRole::Officer)
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, UserRole::SuperAdmin)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Viewer
    }
}

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password_hash: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::SuperAdmin.can_write_records());
        assert!(UserRole::Officer.can_write_records());
        assert!(!UserRole::Viewer.can_write_records());
        assert!(UserRole::SuperAdmin.is_super_admin());
        assert!(!UserRole::Officer.is_super_admin());
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(serde_json::to_string(&UserRole::SuperAdmin).unwrap(), "\"super_admin\"");
        let role: UserRole = serde_json::from_str("\"officer\"").unwrap();
        assert_eq!(role, UserRole::Officer);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("a@b.ci".into(), "secret-hash".into(), UserRole::Viewer);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
