use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::app_error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    #[serde(rename = "Strict & Formal")]
    StrictFormal,
    Professional,
    Neutral,
    #[default]
    Friendly,
    #[serde(rename = "Warm & Loving")]
    WarmLoving,
}

impl Tone {
    /// Every tone, from most formal to warmest.
    pub const ALL: [Tone; 5] = [
        Tone::StrictFormal,
        Tone::Professional,
        Tone::Neutral,
        Tone::Friendly,
        Tone::WarmLoving,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::StrictFormal => "Strict & Formal",
            Tone::Professional => "Professional",
            Tone::Neutral => "Neutral",
            Tone::Friendly => "Friendly",
            Tone::WarmLoving => "Warm & Loving",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            Tone::StrictFormal => "strict-formal",
            Tone::Professional => "professional",
            Tone::Neutral => "neutral",
            Tone::Friendly => "friendly",
            Tone::WarmLoving => "warm-loving",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Tone {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let alias = wanted.to_ascii_lowercase().replace('_', "-");

        Tone::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(wanted) || tone.alias() == alias)
            .ok_or_else(|| {
                let labels: Vec<&str> = Tone::ALL.iter().map(Tone::label).collect();
                AppError::Validation(format!(
                    "Unknown tone '{}'. Choose one of: {}",
                    wanted,
                    labels.join(", ")
                ))
            })
    }
}
