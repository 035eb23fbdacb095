use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    middleware::from_fn_with_state,
    response::Response,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::media_controller::MediaController;
use crate::dto::media_dto::MediaResponse;
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::services::MediaUpload;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError};

/// Margen para las cabeceras multipart por encima del tamaño del archivo
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_media_router(state: AppState) -> Router<AppState> {
    let body_limit = state.media_storage.max_bytes() + MULTIPART_OVERHEAD;

    let public = Router::new()
        .route("/:id", get(get_media))
        .route("/:id/file", get(get_media_file));

    let protected = Router::new()
        .route("/", post(upload_media))
        .route("/:id", delete(delete_media))
        .route_layer(from_fn_with_state(state, auth_middleware))
        .layer(DefaultBodyLimit::max(body_limit));

    public.merge(protected)
}

async fn upload_media(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<MediaResponse>>, AppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut alt: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                file = Some((filename, mime_type, bytes.to_vec()));
            }
            Some("alt") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                alt = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }

    let (filename, mime_type, bytes) =
        file.ok_or_else(|| validation_error("file", "Se requiere el campo 'file'"))?;

    let controller = MediaController::new(&state);
    let response = controller
        .upload(
            &user,
            MediaUpload {
                filename,
                mime_type,
                alt,
                bytes,
            },
        )
        .await?;
    Ok(Json(response))
}

async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MediaResponse>, AppError> {
    let controller = MediaController::new(&state);
    let media = controller.get_by_id(id).await?;
    Ok(Json(media.into()))
}

async fn get_media_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let controller = MediaController::new(&state);
    let (media, bytes) = controller.file(id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, media.mime_type.as_str())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", media.filename),
        )
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn delete_media(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MediaController::new(&state);
    controller.delete(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Archivo eliminado exitosamente"
    })))
}
