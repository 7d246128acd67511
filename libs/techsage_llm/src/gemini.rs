use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{LLMError, LLMService, ModelInfo};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
const MODELS_PAGE_SIZE: &str = "100";
const MAX_MODEL_PAGES: usize = 20;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

pub struct GeminiService {
    client: Client,
    base_url: String,
}

impl GeminiService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LLMError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn models_url(&self) -> String {
        format!("{}/{}/models", self.base_url, API_VERSION)
    }

    fn generate_url(&self, model: &str) -> String {
        let model = if model.starts_with("models/") || model.starts_with("tunedModels/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!("{}/{}/{}:generateContent", self.base_url, API_VERSION, model)
    }
}

#[async_trait]
impl LLMService for GeminiService {
    async fn list_models(&self, api_key: &str) -> Result<Vec<ModelInfo>, LLMError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0;

        loop {
            let mut request = self
                .client
                .get(self.models_url())
                .header(API_KEY_HEADER, api_key)
                .query(&[("pageSize", MODELS_PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = check_status(request.send().await?).await?;
            let page: ListModelsResponse = serde_json::from_str(&response.text().await?)?;

            models.extend(page.models);
            pages += 1;
            match next_page_token(page_token.as_deref(), page.next_page_token, pages) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(count = models.len(), "Listed Gemini models");
        Ok(models)
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        api_key: &str,
    ) -> Result<String, LLMError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url(model))
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        extract_text(parsed)
    }
}

/// Token for the next models page, or `None` once listing should stop.
/// A repeated token or too many pages ends the listing.
fn next_page_token(current: Option<&str>, next: Option<String>, pages: usize) -> Option<String> {
    let next = next.filter(|token| !token.is_empty())?;
    if current == Some(next.as_str()) {
        tracing::warn!("Gemini repeated a models page token, stopping");
        return None;
    }
    if pages >= MAX_MODEL_PAGES {
        tracing::warn!(pages, "Stopped listing Gemini models at the page limit");
        return None;
    }
    Some(next)
}

async fn check_status(response: Response) -> Result<Response, LLMError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(error_from_status(status, &body))
}

fn error_from_status(status: u16, body: &str) -> LLMError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let invalid_key = status == 401
        || envelope.as_ref().is_some_and(|envelope| {
            envelope.error.status == "UNAUTHENTICATED"
                || envelope
                    .error
                    .details
                    .iter()
                    .any(|detail| detail["reason"].as_str() == Some("API_KEY_INVALID"))
        });

    let message = match envelope {
        Some(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if body.trim().is_empty() => format!("HTTP {}", status),
        _ => body.to_string(),
    };

    if invalid_key {
        return LLMError::InvalidCredential(message);
    }

    LLMError::Api { status, message }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, LLMError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .unwrap_or_else(|| "NO_CANDIDATES".to_string());
        return Err(LLMError::EmptyResponse(reason));
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<String>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LLMError::EmptyResponse(
            candidate
                .finish_reason
                .unwrap_or_else(|| "UNKNOWN".to_string()),
        ));
    }

    Ok(text)
}
