//! Session lifecycle handlers: creation, inspection, credentials, model
//! selection.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use secrecy::SecretString;
use serde::Deserialize;
use uuid::Uuid;

use extsmith_core::conversation::session::{SessionEntry, SessionState};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for storing the session's API key.
#[derive(Debug, Deserialize)]
pub struct SetCredentialsRequest {
    pub api_key: String,
}

/// Request body for selecting a model.
#[derive(Debug, Deserialize)]
pub struct SelectModelRequest {
    pub model: String,
}

/// Serializable snapshot of a session for API responses.
///
/// The API key itself never leaves the server; only its presence is
/// reported.
pub fn session_view(
    id: &Uuid,
    entry: &SessionEntry,
    session: &SessionState,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "transcript": session.transcript,
        "requirements": session.requirements,
        "selected_model": session.selected_model,
        "available_models": session.available_models,
        "has_credential": session.api_key.is_some(),
        "processing": entry.is_processing(),
        "artifact": session.artifact,
    })
}

/// Look up a session entry or fail with 404.
pub fn require_session(
    state: &AppState,
    id: &Uuid,
) -> Result<Arc<SessionEntry>, AppError> {
    state
        .session(id)
        .ok_or_else(|| AppError::NotFound("session not found".to_string()))
}

/// POST /api/v1/sessions - Create a fresh session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = state.create_session();
    let entry = require_session(&state, &id)?;
    let session = entry.state.lock().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        session_view(&id, &entry, &session),
        request_id,
        elapsed,
    )))
}

/// GET /api/v1/sessions/:id - Inspect a session.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let entry = require_session(&state, &id)?;
    let session = entry.state.lock().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        session_view(&id, &entry, &session),
        request_id,
        elapsed,
    )))
}

/// PUT /api/v1/sessions/:id/credentials - Store the API key.
///
/// Rejects a blank key; a successful save also refreshes the model
/// listing so the picker is populated as soon as a key exists.
pub async fn set_credentials(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetCredentialsRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let key = body.api_key.trim();
    if key.is_empty() {
        return Err(AppError::Validation("API key cannot be empty".to_string()));
    }

    let entry = require_session(&state, &id)?;
    let _guard = entry.begin_processing();
    let mut session = entry.state.lock().await;
    session.set_credential(SecretString::from(key.to_string()));
    super::chat::refresh_models(&mut session).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        session_view(&id, &entry, &session),
        request_id,
        elapsed,
    )))
}

/// PUT /api/v1/sessions/:id/model - Select the generation model.
pub async fn select_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectModelRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if body.model.trim().is_empty() {
        return Err(AppError::Validation("model cannot be empty".to_string()));
    }

    let entry = require_session(&state, &id)?;
    let mut session = entry.state.lock().await;
    session.selected_model = body.model.trim().to_string();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        session_view(&id, &entry, &session),
        request_id,
        elapsed,
    )))
}
