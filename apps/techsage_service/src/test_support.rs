//! Test helpers: a scripted model backend and request plumbing.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Extension, Router,
};
use parking_lot::Mutex;
use std::sync::Arc;
use techsage_llm::{LLMClient, LLMClientConfig, LLMError, LLMService, ModelInfo};
use tower::ServiceExt;

use crate::{
    app_module::AppState, app_router::application_router,
    session::session_registry::DEFAULT_SESSION_IDLE,
};

#[derive(Debug, Clone)]
pub enum StubReply {
    Text(String),
    InvalidKey,
    NoModels,
    ApiFailure,
}

pub struct StubLLMService {
    reply: StubReply,
    seen_keys: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl LLMService for StubLLMService {
    async fn list_models(&self, _api_key: &str) -> Result<Vec<ModelInfo>, LLMError> {
        if let StubReply::InvalidKey = self.reply {
            return Err(invalid_key());
        }
        if let StubReply::NoModels = self.reply {
            return Ok(Vec::new());
        }

        Ok(vec![
            ModelInfo {
                name: "models/gemini-1.5-pro".to_string(),
                display_name: None,
                supported_generation_methods: vec!["generateContent".to_string()],
            },
            ModelInfo {
                name: "models/gemini-1.5-flash".to_string(),
                display_name: None,
                supported_generation_methods: vec!["generateContent".to_string()],
            },
        ])
    }

    async fn generate_content(
        &self,
        _model: &str,
        _prompt: &str,
        api_key: &str,
    ) -> Result<String, LLMError> {
        self.seen_keys.lock().push(api_key.to_string());
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::ApiFailure => Err(LLMError::Api {
                status: 500,
                message: "Internal error encountered.".to_string(),
            }),
            StubReply::InvalidKey => Err(invalid_key()),
            StubReply::NoModels => Err(LLMError::NoAvailableModel),
        }
    }
}

fn invalid_key() -> LLMError {
    LLMError::InvalidCredential("API key not valid. Please pass a valid API key.".to_string())
}

/// Client backed by a stub; the returned list collects every key that
/// reached `generate_content`.
pub fn stub_client(reply: StubReply) -> (LLMClient, Arc<Mutex<Vec<String>>>) {
    let seen_keys = Arc::new(Mutex::new(Vec::new()));
    let service = StubLLMService {
        reply,
        seen_keys: seen_keys.clone(),
    };
    (
        LLMClient::with_service(service, LLMClientConfig::default()),
        seen_keys,
    )
}

pub fn test_app(reply: StubReply) -> (Router, AppState) {
    let (client, _) = stub_client(reply);
    let state = AppState::new(client, DEFAULT_SESSION_IDLE);
    let app = application_router().layer(Extension(state.clone()));
    (app, state)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, request).await;
    let value = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&body).unwrap()
    };
    (status, value)
}
