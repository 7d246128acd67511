use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use techsage_llm::LLMError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Generation(#[from] LLMError),

    #[error("No saved result at position {index} (collection holds {len})")]
    Index { index: usize, len: usize },

    #[error("Nothing to save yet. Generate a result first.")]
    NothingStaged,

    #[error("Missing or malformed x-session-id header")]
    MissingSession,

    #[error("Unknown session: {0}")]
    SessionNotFound(Uuid),

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MissingSession => StatusCode::BAD_REQUEST,
            AppError::Generation(e) if e.is_credential_error() => StatusCode::UNAUTHORIZED,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Index { .. } | AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::NothingStaged => StatusCode::CONFLICT,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (
            status,
            Json(serde_json::json!({
                "error": self.to_string()
            })),
        )
            .into_response()
    }
}
