//! Birth weight in pounds and ounces

use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted birth weight
///
/// Ounces are not carried into pounds; `oz` may exceed 15 if that is what
/// was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Weight {
    pub lbs: u32,
    pub oz: u32,
}

impl Weight {
    #[inline]
    pub fn new(lbs: u32, oz: u32) -> Self {
        Self { lbs, oz }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lb", self.lbs)?;
        if self.lbs > 1 {
            f.write_str("s")?;
        }
        if self.oz > 0 {
            write!(f, " {} oz", self.oz)?;
        }
        Ok(())
    }
}
