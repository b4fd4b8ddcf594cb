//! # Runtime Identifiers
//!
//! Enumerated runtime tags the deployment platform can provision.
//! Tags are validated at declaration time; an unknown tag never makes
//! it into a descriptor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ResourceError;

/// A supported runtime tag.
///
/// Serializes as the exact platform identifier (e.g. `python3.8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runtime {
    #[serde(rename = "python3.8")]
    Python38,
    #[serde(rename = "python3.9")]
    Python39,
    #[serde(rename = "python3.10")]
    Python310,
    #[serde(rename = "python3.11")]
    Python311,
    #[serde(rename = "python3.12")]
    Python312,
    #[serde(rename = "python3.13")]
    Python313,
    #[serde(rename = "nodejs16.x")]
    Node16,
    #[serde(rename = "nodejs18.x")]
    Node18,
    #[serde(rename = "nodejs20.x")]
    Node20,
    #[serde(rename = "nodejs22.x")]
    Node22,
}

/// All supported runtimes, in tag order.
pub const SUPPORTED_RUNTIMES: &[Runtime] = &[
    Runtime::Python38,
    Runtime::Python39,
    Runtime::Python310,
    Runtime::Python311,
    Runtime::Python312,
    Runtime::Python313,
    Runtime::Node16,
    Runtime::Node18,
    Runtime::Node20,
    Runtime::Node22,
];

impl Runtime {
    /// Returns the platform tag for this runtime.
    pub fn as_str(&self) -> &'static str {
        match self {
            Runtime::Python38 => "python3.8",
            Runtime::Python39 => "python3.9",
            Runtime::Python310 => "python3.10",
            Runtime::Python311 => "python3.11",
            Runtime::Python312 => "python3.12",
            Runtime::Python313 => "python3.13",
            Runtime::Node16 => "nodejs16.x",
            Runtime::Node18 => "nodejs18.x",
            Runtime::Node20 => "nodejs20.x",
            Runtime::Node22 => "nodejs22.x",
        }
    }

    /// Returns the language family ("python" or "nodejs").
    pub fn family(&self) -> &'static str {
        match self {
            Runtime::Python38
            | Runtime::Python39
            | Runtime::Python310
            | Runtime::Python311
            | Runtime::Python312
            | Runtime::Python313 => "python",
            Runtime::Node16 | Runtime::Node18 | Runtime::Node20 | Runtime::Node22 => "nodejs",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Runtime {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SUPPORTED_RUNTIMES
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ResourceError::UnsupportedRuntime(s.to_string()))
    }
}
