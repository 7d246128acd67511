use serde::Serialize;

use crate::{
    app_error::AppError,
    collection::{collection_model::SavedResult, collection_store::ResultCollection},
    prompt::{prompt_builder::TechSagePrompt, tone::Tone},
};

/// The three ingredients of a request, as last submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptInputs {
    pub task: String,
    pub context: String,
    pub tone: Tone,
}

/// Last successful generation, waiting for an explicit save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedResult {
    pub title: String,
    pub context: String,
    pub content: String,
    pub model: String,
}

/// Everything one user session owns.
#[derive(Debug, Default)]
pub struct SessionState {
    collection: ResultCollection,
    staged: Option<StagedResult>,
    last_inputs: Option<PromptInputs>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self) -> &ResultCollection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut ResultCollection {
        &mut self.collection
    }

    pub fn staged(&self) -> Option<&StagedResult> {
        self.staged.as_ref()
    }

    pub fn last_inputs(&self) -> Option<&PromptInputs> {
        self.last_inputs.as_ref()
    }

    /// Records a successful generation. Replaces any earlier staged result.
    pub fn stage(&mut self, inputs: PromptInputs, model: String, content: String) -> StagedResult {
        let staged = StagedResult {
            title: TechSagePrompt::title(&inputs.task, inputs.tone),
            context: inputs.context.clone(),
            content,
            model,
        };
        self.staged = Some(staged.clone());
        self.last_inputs = Some(inputs);
        staged
    }

    /// Appends the staged result to the collection. The staged result stays
    /// available, so saving twice stores two entries.
    pub fn save_staged(&mut self, context_override: Option<String>) -> Result<SavedResult, AppError> {
        let staged = self.staged.as_ref().ok_or(AppError::NothingStaged)?;

        let context = context_override.unwrap_or_else(|| staged.context.clone());
        let saved = SavedResult::new(staged.title.clone(), context, staged.content.clone());
        self.collection.append(saved.clone());

        Ok(saved)
    }

    /// Clears the form: inputs and staged result go, saved entries stay.
    pub fn reset(&mut self) {
        self.staged = None;
        self.last_inputs = None;
    }
}
