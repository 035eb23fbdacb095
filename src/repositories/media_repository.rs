use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::media::Media;
use crate::repositories::MediaStore;
use crate::utils::errors::AppResult;

pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaStore for MediaRepository {
    async fn insert(&self, media: &Media) -> AppResult<Media> {
        let media = sqlx::query_as::<_, Media>(
            r#"
            INSERT INTO media (id, filename, alt, mime_type, filesize, checksum, uploaded_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(media.id)
        .bind(&media.filename)
        .bind(&media.alt)
        .bind(&media.mime_type)
        .bind(media.filesize)
        .bind(&media.checksum)
        .bind(media.uploaded_by)
        .bind(media.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(media)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Media>> {
        let media = sqlx::query_as::<_, Media>("SELECT * FROM media WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(media)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
