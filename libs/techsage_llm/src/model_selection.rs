//! Ranked model selection.
//!
//! Providers expose many models under identifiers like `models/gemini-1.5-flash`.
//! A [`ModelPreference`] is an ordered list of identifier terms. The first term
//! that matches any available model wins; inside one term, provider order wins.
//! When nothing matches, the first available model is used.
//!
//! Matching is a substring test on provider identifiers, so a renamed model
//! family silently falls through to the next term.

use crate::{LLMError, ModelInfo};

/// Generation method a model must support to be considered.
pub const GENERATE_CONTENT_METHOD: &str = "generateContent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPreference {
    terms: Vec<String>,
}

impl Default for ModelPreference {
    fn default() -> Self {
        Self::new(["flash", "pro"])
    }
}

impl ModelPreference {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|term| {
                    let term: String = term.into();
                    term.trim().to_string()
                })
                .filter(|term| !term.is_empty())
                .collect(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Picks a model among those supporting `generateContent`.
    pub fn select<'a>(&self, models: &'a [ModelInfo]) -> Result<&'a ModelInfo, LLMError> {
        let candidates: Vec<&ModelInfo> = models
            .iter()
            .filter(|model| model.supports(GENERATE_CONTENT_METHOD))
            .collect();

        let first = candidates.first().copied().ok_or(LLMError::NoAvailableModel)?;

        let chosen = self
            .terms
            .iter()
            .find_map(|term| {
                candidates
                    .iter()
                    .copied()
                    .find(|model| model.name.contains(term.as_str()))
            })
            .unwrap_or(first);

        Ok(chosen)
    }
}
