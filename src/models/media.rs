//! Modelo de Media
//!
//! Archivos subidos (fotos de identidad). Los bytes viven en disco,
//! aquí solo se guardan los metadatos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Media - mapea exactamente a la tabla media
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Media {
    pub id: Uuid,
    pub filename: String,
    pub alt: Option<String>,
    pub mime_type: String,
    pub filesize: i64,
    pub checksum: String,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Media {
    /// Nombre del archivo en disco: `<id>-<filename>`
    pub fn stored_name(&self) -> String {
        format!("{}-{}", self.id, self.filename)
    }

    pub fn url(&self) -> String {
        format!("/api/media/{}/file", self.id)
    }
}
