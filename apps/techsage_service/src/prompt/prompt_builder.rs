use super::tone::Tone;
use crate::app_error::AppError;

pub struct TechSagePrompt;

impl TechSagePrompt {
    /// Builds the single instruction string sent to the model.
    ///
    /// `task` must contain something other than whitespace; `context` may be
    /// empty.
    pub fn assemble(task: &str, context: &str, tone: Tone) -> Result<String, AppError> {
        if task.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter at least a Task to get started.".to_string(),
            ));
        }

        Ok(format!(
            "You are a helpful assistant.\nTASK: {}\nCONTEXT: {}\nTONE: {}\nPlease generate the response now.",
            task, context, tone
        ))
    }

    /// Label a generated result is saved under.
    pub fn title(task: &str, tone: Tone) -> String {
        format!("{} ({})", task, tone)
    }
}
