use std::sync::Arc;

use uuid::Uuid;

use crate::dto::media_dto::MediaResponse;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::media::Media;
use crate::repositories::MediaStore;
use crate::services::{MediaStorage, MediaUpload};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct MediaController {
    media: Arc<dyn MediaStore>,
    storage: MediaStorage,
}

impl MediaController {
    pub fn new(state: &AppState) -> Self {
        Self {
            media: state.media.clone(),
            storage: state.media_storage.clone(),
        }
    }

    pub async fn upload(
        &self,
        actor: &AuthenticatedUser,
        upload: MediaUpload,
    ) -> AppResult<ApiResponse<MediaResponse>> {
        actor.require_writer()?;

        let media = self.storage.save(upload, actor.user_id).await?;
        let saved = match self.media.insert(&media).await {
            Ok(saved) => saved,
            Err(e) => {
                // sin metadatos el archivo quedaría huérfano
                self.storage.remove(&media).await?;
                return Err(e);
            }
        };

        Ok(ApiResponse::success_with_message(saved.into(), "Archivo subido exitosamente"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Media> {
        self.media
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Media", &id.to_string()))
    }

    /// Metadatos y bytes del archivo
    pub async fn file(&self, id: Uuid) -> AppResult<(Media, Vec<u8>)> {
        let media = self.get_by_id(id).await?;
        let bytes = self.storage.read(&media).await?;
        Ok((media, bytes))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<()> {
        actor.require_super_admin()?;

        let media = self.get_by_id(id).await?;
        self.media.delete(id).await?;
        self.storage.remove(&media).await?;

        tracing::info!("🗑️ Archivo {} eliminado por {}", media.stored_name(), actor.email);
        Ok(())
    }
}
