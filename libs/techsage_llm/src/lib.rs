use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod error;
pub mod gemini;
pub mod model_selection;

pub use error::LLMError;
pub use model_selection::ModelPreference;

#[derive(Debug, Clone)]
pub enum LLMProvider {
    Gemini,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|supported| supported == method)
    }
}

/// Text produced by a provider, tagged with the model that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub model: String,
    pub text: String,
}

/// A text-generation backend. The credential is passed on every call and
/// never retained by implementations.
#[async_trait]
pub trait LLMService {
    async fn list_models(&self, api_key: &str) -> Result<Vec<ModelInfo>, LLMError>;

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        api_key: &str,
    ) -> Result<String, LLMError>;
}

#[derive(Debug, Clone)]
pub struct LLMClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub model_preference: ModelPreference,
}

impl Default for LLMClientConfig {
    fn default() -> Self {
        Self {
            base_url: gemini::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(180),
            model_preference: ModelPreference::default(),
        }
    }
}

pub struct LLMClient {
    service: Box<dyn LLMService + Send + Sync>,
    config: LLMClientConfig,
}

impl LLMClient {
    pub fn new(provider: LLMProvider, config: Option<LLMClientConfig>) -> Result<Self, LLMError> {
        let config = config.unwrap_or_default();
        let service: Box<dyn LLMService + Send + Sync> = match provider {
            LLMProvider::Gemini => Box::new(gemini::GeminiService::new(
                &config.base_url,
                config.timeout,
            )?),
        };

        Ok(Self { service, config })
    }

    /// Builds a client around an arbitrary backend.
    pub fn with_service<S>(service: S, config: LLMClientConfig) -> Self
    where
        S: LLMService + Send + Sync + 'static,
    {
        Self {
            service: Box::new(service),
            config,
        }
    }

    pub fn with_model_preference(mut self, model_preference: ModelPreference) -> Self {
        self.config.model_preference = model_preference;
        self
    }

    /// Picks a model for `api_key` and runs `prompt` against it once.
    pub async fn generate(&self, prompt: &str, api_key: &str) -> Result<Generation, LLMError> {
        let models = self.service.list_models(api_key).await?;
        let model = self.config.model_preference.select(&models)?;

        tracing::info!(
            model = %model.name,
            available = models.len(),
            prompt_chars = prompt.chars().count(),
            "Generating content"
        );

        let text = self
            .service
            .generate_content(&model.name, prompt, api_key)
            .await
            .inspect_err(|e| tracing::warn!(model = %model.name, "Generation failed: {}", e))?;

        Ok(Generation {
            model: model.name.clone(),
            text,
        })
    }
}
