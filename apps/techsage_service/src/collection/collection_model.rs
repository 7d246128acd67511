use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated result the user chose to keep. Entries are never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedResult {
    pub title: String,
    pub context: String,
    pub content: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedResult {
    pub fn new(
        title: impl Into<String>,
        context: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            context: context.into(),
            content: content.into(),
            saved_at: Utc::now(),
        }
    }
}

/// A saved result as shown to the user, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct SavedResultView {
    /// Position in newest-first order; pass this to delete.
    pub index: usize,
    /// 1-based insertion number ("Saved item #3").
    pub item_number: usize,
    #[serde(flatten)]
    pub result: SavedResult,
}
