//! Core types for Rolling

use crate::{ops, Result, RollingError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp in integer ticks (the unit is up to the caller, e.g. epoch millis)
pub type Timestamp = i64;

/// Operator function over `f64` observations
pub type OpFn = fn(&f64, &f64) -> f64;

/// Aggregation functions available to configured windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorKind {
    Sum,
    Product,
    Min,
    Max,
    /// Rolling sum divided by the number of values in the window
    Mean,
}

impl OperatorKind {
    /// The associative operator the window combines with
    pub fn op(self) -> OpFn {
        match self {
            OperatorKind::Sum | OperatorKind::Mean => ops::sum::<f64>,
            OperatorKind::Product => ops::product::<f64>,
            OperatorKind::Min => ops::min::<f64>,
            OperatorKind::Max => ops::max::<f64>,
        }
    }

    /// Turn a combined window value into the reported result
    pub fn finish(self, combined: f64, window_size: usize) -> f64 {
        match self {
            OperatorKind::Mean => combined / window_size as f64,
            _ => combined,
        }
    }

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Sum => "sum",
            OperatorKind::Product => "product",
            OperatorKind::Min => "min",
            OperatorKind::Max => "max",
            OperatorKind::Mean => "mean",
        }
    }
}

impl FromStr for OperatorKind {
    type Err = RollingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(OperatorKind::Sum),
            "product" | "prod" => Ok(OperatorKind::Product),
            "min" => Ok(OperatorKind::Min),
            "max" => Ok(OperatorKind::Max),
            "mean" | "avg" | "average" => Ok(OperatorKind::Mean),
            other => Err(RollingError::Config(format!("unknown operator: {}", other))),
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the window decides which observations to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WindowSpec {
    /// The most recent `size` observations
    Count { size: usize },
    /// Observations less than `span` ticks older than the newest one
    Duration { span: Timestamp },
}

impl Default for WindowSpec {
    fn default() -> Self {
        WindowSpec::Count {
            size: crate::config::DEFAULT_WINDOW_SIZE,
        }
    }
}

/// When a configured window reports a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitPolicy {
    /// After every observation
    Always,
    /// Only once the window is full
    #[default]
    WhenFull,
}

/// Configuration for a rolling aggregate over `f64` observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Operator applied across the window
    pub operator: OperatorKind,
    /// Window policy
    #[serde(default)]
    pub window: WindowSpec,
    /// Emission policy
    #[serde(default)]
    pub emit: EmitPolicy,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            operator: OperatorKind::Mean,
            window: WindowSpec::default(),
            emit: EmitPolicy::default(),
        }
    }
}

impl WindowConfig {
    /// Parse from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WindowConfig =
            serde_json::from_str(json).map_err(|e| RollingError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the window policy can be constructed
    pub fn validate(&self) -> Result<()> {
        match self.window {
            WindowSpec::Count { size: 0 } => Err(RollingError::InvalidWindowSize(0)),
            WindowSpec::Duration { span } if span < 0 => {
                Err(RollingError::InvalidWindowDuration(span.to_string()))
            }
            _ => Ok(()),
        }
    }
}
