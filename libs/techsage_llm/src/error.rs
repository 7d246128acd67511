use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("{0}")]
    InvalidCredential(String),

    #[error("No valid models found for your key.")]
    NoAvailableModel,

    #[error("API returned error status: {status}, message: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to reach the generation service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The model returned no text (finish reason: {0})")]
    EmptyResponse(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl LLMError {
    pub fn is_credential_error(&self) -> bool {
        matches!(self, LLMError::InvalidCredential(_))
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::InvalidResponse(err.to_string())
    }
}
