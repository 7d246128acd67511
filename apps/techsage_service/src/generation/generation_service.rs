use serde::Deserialize;
use std::sync::Arc;
use techsage_llm::LLMClient;
use uuid::Uuid;

use crate::{
    app_error::AppError,
    prompt::{prompt_builder::TechSagePrompt, tone::Tone},
    session::{
        session_registry::SessionRegistry,
        session_state::{PromptInputs, StagedResult},
    },
};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Clone)]
pub struct GenerationService {
    llm_client: Arc<LLMClient>,
}

impl GenerationService {
    pub fn new(llm_client: LLMClient) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
        }
    }

    /// Validates the inputs, calls the model and stages the result in the
    /// session. On any failure the session is left as it was.
    pub async fn generate(
        &self,
        sessions: &SessionRegistry,
        session_id: Uuid,
        request: GenerateRequest,
    ) -> Result<StagedResult, AppError> {
        let api_key = request
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("Please enter your Google API Key first.".to_string())
            })?;

        let tone = match request.tone.as_deref() {
            Some(tone) if !tone.trim().is_empty() => tone.parse::<Tone>()?,
            _ => Tone::default(),
        };

        let prompt = TechSagePrompt::assemble(&request.task, &request.context, tone)?;

        if !sessions.contains(session_id) {
            return Err(AppError::SessionNotFound(session_id));
        }

        // The registry lock is not held across this call.
        let generation = self.llm_client.generate(&prompt, &api_key).await?;

        let inputs = PromptInputs {
            task: request.task,
            context: request.context,
            tone,
        };

        let staged = sessions.with_session(session_id, |session| {
            session.stage(inputs, generation.model, generation.text)
        })?;

        tracing::info!(session = %session_id, model = %staged.model, "Result staged");
        Ok(staged)
    }
}
