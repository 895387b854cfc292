//! Well-log source formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source file format of a well log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WellLogFormat {
    /// Log ASCII Standard (text).
    Las,
    /// Digital Log Interchange Standard (binary, RP66).
    Dlis,
    Unknown,
}

impl WellLogFormat {
    pub const ALL: [WellLogFormat; 3] = [
        WellLogFormat::Las,
        WellLogFormat::Dlis,
        WellLogFormat::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WellLogFormat::Las => "LAS",
            WellLogFormat::Dlis => "DLIS",
            WellLogFormat::Unknown => "UNKNOWN",
        }
    }

    /// String forms of every format.
    pub fn list() -> Vec<&'static str> {
        Self::ALL.iter().map(WellLogFormat::as_str).collect()
    }
}

impl fmt::Display for WellLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WellLogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LAS" => Ok(WellLogFormat::Las),
            "DLIS" => Ok(WellLogFormat::Dlis),
            "UNKNOWN" => Ok(WellLogFormat::Unknown),
            _ => Err(format!("Unknown well log format: {s}")),
        }
    }
}
