//! Predicted sex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex guessed in a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Boy,
    #[default]
    Girl,
    Other,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boy => "boy",
            Self::Girl => "girl",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sex: {0:?} (expected boy, girl, or other)")]
pub struct SexParseError(pub String);

impl FromStr for Sex {
    type Err = SexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boy" => Ok(Self::Boy),
            "girl" => Ok(Self::Girl),
            "other" => Ok(Self::Other),
            _ => Err(SexParseError(s.to_string())),
        }
    }
}
