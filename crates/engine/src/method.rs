use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// How an expense total is divided among the selected participants.
///
/// - `Equal`: everybody pays the same; no per-person entry.
/// - `Percentage`: each entry is a percentage of the total, summing to 100.
/// - `Shares`: each entry is an integer share count (>= 1).
/// - `Unequal`: each entry is an explicit amount, summing to the total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    #[default]
    Equal,
    Percentage,
    Shares,
    Unequal,
}

impl SplitMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Percentage => "percentage",
            Self::Shares => "shares",
            Self::Unequal => "unequal",
        }
    }

    /// Whether every selected participant carries an entry for this method.
    #[must_use]
    pub const fn needs_entries(self) -> bool {
        !matches!(self, Self::Equal)
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "percentage" | "percent" => Ok(Self::Percentage),
            "shares" => Ok(Self::Shares),
            "unequal" | "exact" => Ok(Self::Unequal),
            other => Err(EngineError::InvalidMethod(other.to_string())),
        }
    }
}
