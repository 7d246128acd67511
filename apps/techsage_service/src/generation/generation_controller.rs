use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;

use super::generation_service::GenerateRequest;
use crate::{
    app_error::AppError,
    app_extract::AppJson,
    app_module::AppState,
    prompt::tone::Tone,
    session::{session_extractor::SessionId, session_state::StagedResult},
};

#[derive(Debug, Serialize)]
pub struct ToneOption {
    pub label: &'static str,
    pub default: bool,
}

pub fn generation_router() -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/tones", get(list_tones))
}

pub async fn generate(
    Extension(ctx): Extension<AppState>,
    SessionId(session_id): SessionId,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<StagedResult>, AppError> {
    let staged = ctx
        .service
        .generation_service
        .generate(&ctx.sessions, session_id, request)
        .await?;

    Ok(Json(staged))
}

pub async fn list_tones() -> Json<Vec<ToneOption>> {
    Json(
        Tone::ALL
            .iter()
            .map(|tone| ToneOption {
                label: tone.label(),
                default: *tone == Tone::default(),
            })
            .collect(),
    )
}
