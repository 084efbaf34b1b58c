//! Backend collections

use serde::{Deserialize, Serialize};
use std::fmt;

/// A live collection that subscribers can watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Names,
    Likes,
    Predictions,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Self::Names, Self::Likes, Self::Predictions];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Names => "names",
            Self::Likes => "likes",
            Self::Predictions => "predictions",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Collection::parse("likes"), Some(Collection::Likes));
        assert_eq!(Collection::parse("votes"), None);
        for collection in Collection::ALL {
            assert_eq!(Collection::parse(collection.as_str()), Some(collection));
        }
    }
}
