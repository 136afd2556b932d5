//! Conversation handlers: message submission and model listing.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

use extsmith_core::conversation::service::ConversationService;
use extsmith_core::conversation::session::SessionState;
use extsmith_core::llm::catalog;
use extsmith_infra::llm::gemini::GeminiClient;

use crate::http::error::AppError;
use crate::http::handlers::session::{require_session, session_view};
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for submitting a user message.
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub message: String,
}

/// Build a Gemini client from the session's stored credential, if any.
fn provider_for(session: &SessionState) -> Option<GeminiClient> {
    session
        .api_key
        .as_ref()
        .map(|key| GeminiClient::new(SecretString::from(key.expose_secret().to_string())))
}

/// Refresh the session's model listing and reconcile its selection.
pub(super) async fn refresh_models(session: &mut SessionState) -> catalog::ModelListing {
    let provider = provider_for(session);
    let listing = catalog::list_models(provider.as_ref()).await;
    session.available_models = listing.models.clone();
    session.selected_model =
        catalog::reconcile_selection(&session.selected_model, &listing.models);
    listing
}

/// POST /api/v1/sessions/:id/messages - Submit one user turn.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PostMessageRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let entry = require_session(&state, &id)?;
    let _guard = entry.begin_processing();
    let mut session = entry.state.lock().await;

    let service =
        ConversationService::new(provider_for(&session), state.config.merge_strategy);
    let reply = service.submit(&mut session, &body.message).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({
            "reply": reply,
            "session": session_view(&id, &entry, &session),
        }),
        request_id,
        elapsed,
    )))
}

/// GET /api/v1/sessions/:id/models - List available models.
///
/// Never fails: discovery errors fall back to the fixed default list
/// and are reported through the `fell_back` flag.
pub async fn list_models(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let entry = require_session(&state, &id)?;
    let _guard = entry.begin_processing();
    let mut session = entry.state.lock().await;

    let listing = refresh_models(&mut session).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({
            "models": listing.models,
            "fell_back": listing.fell_back,
            "selected_model": session.selected_model,
        }),
        request_id,
        elapsed,
    )))
}
