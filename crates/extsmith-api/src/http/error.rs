//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use extsmith_types::error::{ChatError, GenerateError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Conversation errors.
    Chat(ChatError),
    /// Bundle generation errors.
    Generate(GenerateError),
    /// Request validation error.
    Validation(String),
    /// Unknown session or missing artifact.
    NotFound(String),
    /// Generic internal error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<GenerateError> for AppError {
    fn from(e: GenerateError) -> Self {
        AppError::Generate(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Chat(e) => {
                let (status, code) = match e {
                    ChatError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
                    ChatError::MissingCredential => {
                        (StatusCode::UNAUTHORIZED, "MISSING_CREDENTIAL")
                    }
                    ChatError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
                    ChatError::MalformedResponse(_) => {
                        (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE")
                    }
                };
                (status, code, e.to_string())
            }
            AppError::Generate(e) => {
                let (status, code) = match e {
                    GenerateError::Validation(_) => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
                    }
                    GenerateError::Storage(_) | GenerateError::Archive(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_ERROR")
                    }
                };
                (status, code, e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extsmith_types::llm::LlmError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Chat(ChatError::EmptyInput), StatusCode::BAD_REQUEST),
            (
                AppError::Chat(ChatError::MissingCredential),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Chat(ChatError::Upstream(LlmError::RateLimited)),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Chat(ChatError::MalformedResponse("x".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Generate(GenerateError::Validation("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Generate(GenerateError::Storage("x".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
