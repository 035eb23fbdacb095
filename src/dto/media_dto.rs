use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::media::Media;

#[derive(Debug, Serialize)]
pub struct MediaResponse {
    pub id: Uuid,
    pub filename: String,
    pub alt: Option<String>,
    pub mime_type: String,
    pub filesize: i64,
    pub checksum: String,
    pub url: String,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Media> for MediaResponse {
    fn from(media: Media) -> Self {
        Self {
            url: media.url(),
            id: media.id,
            filename: media.filename,
            alt: media.alt,
            mime_type: media.mime_type,
            filesize: media.filesize,
            checksum: media.checksum,
            uploaded_by: media.uploaded_by,
            created_at: media.created_at,
        }
    }
}
