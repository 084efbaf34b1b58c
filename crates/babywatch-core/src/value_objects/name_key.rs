//! Name key - canonical identity of a name suggestion
//!
//! Format: the uppercased name with every character outside `[A-Z0-9]`
//! replaced by `_`, then `-`, then the category suffix (`b`, `g`, `bg`, or
//! nothing). Keys are also the target of votes, so a vote only counts when
//! the voter's category flags match the ones the name was submitted with.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::Category;

/// Normalized dedup key for a name suggestion
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameKey(String);

impl NameKey {
    /// Normalize a display name and its category flags into a key
    pub fn normalize(name: &str, is_boy: bool, is_girl: bool) -> Self {
        Self::from_category(name, Category::from_flags(is_boy, is_girl))
    }

    /// Normalize with an already-built category
    pub fn from_category(name: &str, category: Category) -> Self {
        let mut key = String::with_capacity(name.len() + 3);
        for c in name.to_uppercase().chars() {
            if c.is_ascii_uppercase() || c.is_ascii_digit() {
                key.push(c);
            } else {
                // Astral characters take two UTF-16 units and historically
                // produced one underscore per unit. Keep keys compatible.
                for _ in 0..c.len_utf16() {
                    key.push('_');
                }
            }
        }
        key.push('-');
        key.push_str(category.suffix());
        Self(key)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The category encoded in the suffix
    pub fn category(&self) -> Category {
        self.0
            .rsplit_once('-')
            .and_then(|(_, suffix)| Category::from_suffix(suffix))
            .unwrap_or_default()
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NameKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error parsing a name key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameKeyParseError {
    #[error("name key is missing the '-' separator")]
    MissingSeparator,

    #[error("name key contains an invalid character: {0:?}")]
    InvalidCharacter(char),

    #[error("invalid category suffix: {0:?}")]
    InvalidSuffix(String),
}

impl FromStr for NameKey {
    type Err = NameKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stem, suffix) = s
            .rsplit_once('-')
            .ok_or(NameKeyParseError::MissingSeparator)?;

        if let Some(c) = stem
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(NameKeyParseError::InvalidCharacter(c));
        }

        if Category::from_suffix(suffix).is_none() {
            return Err(NameKeyParseError::InvalidSuffix(suffix.to_string()));
        }

        Ok(Self(s.to_string()))
    }
}

impl Serialize for NameKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NameKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
