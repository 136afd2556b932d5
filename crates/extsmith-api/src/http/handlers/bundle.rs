//! Bundle generation and artifact download handlers.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use extsmith_core::bundle::generator::BundleGenerator;
use extsmith_infra::filesystem::LocalBundleStore;

use crate::http::error::AppError;
use crate::http::handlers::session::require_session;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/sessions/:id/generate - Produce the extension bundle.
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let entry = require_session(&state, &id)?;
    let _guard = entry.begin_processing();
    let mut session = entry.state.lock().await;

    let generator =
        BundleGenerator::new(LocalBundleStore::new(state.output_root.clone()));
    let result = generator.generate(&session.requirements).await?;
    session.artifact = Some(result.clone());

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::to_value(&result)
            .map_err(|e| AppError::Internal(e.to_string()))?,
        request_id,
        elapsed,
    )))
}

/// GET /api/v1/sessions/:id/bundle - Download the generated zip.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let entry = require_session(&state, &id)?;

    let zip_path = {
        let session = entry.state.lock().await;
        session
            .artifact
            .as_ref()
            .filter(|artifact| artifact.complete)
            .map(|artifact| artifact.zip_path.clone())
            .ok_or_else(|| AppError::NotFound("no bundle generated yet".to_string()))?
    };

    let full_path = state.output_root.join(&zip_path);
    let bytes = tokio::fs::read(&full_path)
        .await
        .map_err(|e| AppError::Internal(format!("failed to read bundle: {e}")))?;

    let filename = zip_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle.zip".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
