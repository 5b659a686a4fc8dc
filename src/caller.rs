//! Peak-caller conventions consumed by the table loader

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::RecapError;

/// Token marking a gain row in directional (diffReps-style) output
pub const INCREASED_MARKER: &str = "Up";

/// Peak caller family whose output is being recalibrated
///
/// Each variant decides which rows survive loading and how the configured
/// p-value field maps onto a linear-scale p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerType {
    /// MACS-style callers report `-log10(p)`
    LogTransform,
    /// diffReps-style callers mix gains and losses; only gains are kept
    DirectionalFilter,
    /// Any caller reporting plain p-values
    Passthrough,
}

impl CallerType {
    /// Whether a data line takes part in recalibration
    pub fn retains(&self, line: &str) -> bool {
        match self {
            CallerType::DirectionalFilter => line.contains(INCREASED_MARKER),
            CallerType::LogTransform | CallerType::Passthrough => true,
        }
    }

    /// Convert the raw column value into a linear-scale p-value
    pub fn pvalue(&self, raw: f64) -> f64 {
        match self {
            CallerType::LogTransform => 10f64.powf(-raw),
            CallerType::DirectionalFilter | CallerType::Passthrough => raw,
        }
    }
}

impl FromStr for CallerType {
    type Err = RecapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "macs" | "log" => Ok(CallerType::LogTransform),
            "diffreps" | "directional" => Ok(CallerType::DirectionalFilter),
            "other" | "plain" => Ok(CallerType::Passthrough),
            _ => Err(RecapError::InvalidArgument {
                reason: format!(
                    "Unknown caller type '{}'. Use: macs, diffreps, or other",
                    s
                ),
            }),
        }
    }
}

impl fmt::Display for CallerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallerType::LogTransform => "macs",
            CallerType::DirectionalFilter => "diffreps",
            CallerType::Passthrough => "other",
        };
        write!(f, "{}", name)
    }
}
