//! DTOs de la API
//!
//! Cuerpos de request/response de los endpoints JSON.

pub mod alert_dto;
pub mod auth_dto;
pub mod media_dto;
pub mod person_dto;
pub mod vehicle_dto;

use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

/// Une el resultado del derive `Validate` con las comprobaciones manuales
pub(crate) fn collect_errors(
    derived: Result<(), ValidationErrors>,
    extra: Vec<(&'static str, validator::ValidationError)>,
) -> Result<(), ValidationErrors> {
    let mut errors = derived.err().unwrap_or_else(ValidationErrors::new);
    for (field, error) in extra {
        errors.add(field, error);
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
