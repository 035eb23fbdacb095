//! Almacenamiento en disco de los archivos subidos
//!
//! Los bytes se guardan en `MEDIA_DIR/<id>-<filename>`; los metadatos
//! (incluido el checksum MD5) van al `MediaStore`.

use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use crate::models::media::Media;
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::validation::validate_image_mime;

/// Archivo recibido por multipart, aún no persistido
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub filename: String,
    pub mime_type: String,
    pub alt: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Valida y escribe el archivo; devuelve los metadatos a registrar
    pub async fn save(&self, upload: MediaUpload, uploaded_by: Uuid) -> AppResult<Media> {
        validate_image_mime(&upload.mime_type)
            .map_err(|_| validation_error("file", "Solo se aceptan imágenes (image/*)"))?;
        if upload.bytes.is_empty() {
            return Err(AppError::BadRequest("El archivo está vacío".to_string()));
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(AppError::BadRequest(format!(
                "El archivo supera el tamaño máximo de {} bytes",
                self.max_bytes
            )));
        }

        let media = Media {
            id: Uuid::new_v4(),
            filename: sanitize_filename(&upload.filename),
            alt: upload.alt,
            mime_type: upload.mime_type,
            filesize: upload.bytes.len() as i64,
            checksum: format!("{:x}", md5::compute(&upload.bytes)),
            uploaded_by,
            created_at: Utc::now(),
        };

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.path_for(&media), &upload.bytes).await?;

        tracing::info!(
            "📷 Archivo {} guardado ({} bytes, md5 {})",
            media.stored_name(),
            media.filesize,
            media.checksum
        );
        Ok(media)
    }

    pub async fn read(&self, media: &Media) -> AppResult<Vec<u8>> {
        match tokio::fs::read(self.path_for(media)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!("❌ Archivo {} no encontrado en disco", media.stored_name());
                Err(AppError::NotFound("Archivo no encontrado".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Borra el archivo; que ya no exista no es un error
    pub async fn remove(&self, media: &Media) -> AppResult<()> {
        match tokio::fs::remove_file(self.path_for(media)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("⚠️ Archivo {} ya no existía", media.stored_name());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, media: &Media) -> PathBuf {
        self.root.join(media.stored_name())
    }
}

/// Solo el último componente del nombre, sin caracteres de ruta
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
