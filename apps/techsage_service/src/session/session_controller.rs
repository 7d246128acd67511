use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use super::{
    session_extractor::SessionId,
    session_state::{PromptInputs, StagedResult},
};
use crate::{app_error::AppError, app_module::AppState};

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub last_inputs: Option<PromptInputs>,
    pub staged: Option<StagedResult>,
    pub saved_count: usize,
}

pub fn session_router() -> Router {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/session", get(get_session).delete(end_session))
        .route("/clear", post(clear_session))
}

pub async fn create_session(Extension(ctx): Extension<AppState>) -> impl IntoResponse {
    let session_id = ctx.sessions.create();

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "session_id": session_id })),
    )
}

pub async fn get_session(
    Extension(ctx): Extension<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = ctx.sessions.with_session(session_id, |session| SessionSnapshot {
        session_id,
        last_inputs: session.last_inputs().cloned(),
        staged: session.staged().cloned(),
        saved_count: session.collection().len(),
    })?;

    Ok(Json(snapshot))
}

pub async fn end_session(
    Extension(ctx): Extension<AppState>,
    SessionId(session_id): SessionId,
) -> Result<StatusCode, AppError> {
    ctx.sessions.remove(session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// "Clear Inputs": drops the current inputs and unsaved result.
pub async fn clear_session(
    Extension(ctx): Extension<AppState>,
    SessionId(session_id): SessionId,
) -> Result<StatusCode, AppError> {
    ctx.sessions.with_session(session_id, |session| session.reset())?;
    Ok(StatusCode::NO_CONTENT)
}
