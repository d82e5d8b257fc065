//! Configured rolling aggregates over `f64` observations
//!
//! Ties a [`WindowConfig`] to a concrete window so callers that pick the
//! operator and policy at runtime (the CLI, config files) don't have to name
//! the generic window types.

use crate::window::{FixedWindowAssociativeOp, TimeWindowAssociativeOp};
use crate::{EmitPolicy, OpFn, Result, RollingError, Timestamp, WindowConfig, WindowSpec};
use tracing::debug;

#[derive(Debug, Clone)]
enum ConfiguredWindow {
    Count(FixedWindowAssociativeOp<f64, OpFn>),
    Duration(TimeWindowAssociativeOp<f64, Timestamp, OpFn>),
}

/// A rolling aggregate built from a [`WindowConfig`]
#[derive(Debug, Clone)]
pub struct RollingAggregate {
    config: WindowConfig,
    window: ConfiguredWindow,
}

impl RollingAggregate {
    /// Create a new, empty aggregate
    pub fn new(config: WindowConfig) -> Result<Self> {
        config.validate()?;
        let op = config.operator.op();

        let window = match config.window {
            WindowSpec::Count { size } => {
                ConfiguredWindow::Count(FixedWindowAssociativeOp::new(op, size)?)
            }
            WindowSpec::Duration { span } => {
                ConfiguredWindow::Duration(TimeWindowAssociativeOp::new(op, span)?)
            }
        };
        debug!(operator = %config.operator, window = ?config.window, "Created rolling aggregate");

        Ok(Self { config, window })
    }

    /// Add an observation. Time windows require `time`; count windows
    /// ignore it.
    pub fn push(&mut self, value: f64, time: Option<Timestamp>) -> Result<()> {
        match &mut self.window {
            ConfiguredWindow::Count(window) => {
                window.update_state(value);
            }
            ConfiguredWindow::Duration(window) => {
                let time = time.ok_or(RollingError::MissingTime)?;
                window.update_state(value, time)?;
            }
        }
        Ok(())
    }

    /// Get the reported value, or `None` while the emit policy holds it back
    pub fn output(&self) -> Result<Option<f64>> {
        if self.config.emit == EmitPolicy::WhenFull && !self.window_full() {
            return Ok(None);
        }

        let (combined, size) = match &self.window {
            ConfiguredWindow::Count(window) => (window.window_value()?, window.window_size()),
            ConfiguredWindow::Duration(window) => (window.window_value()?, window.window_size()),
        };
        Ok(Some(self.config.operator.finish(combined, size)))
    }

    /// Get the number of observations currently in the window
    pub fn window_size(&self) -> usize {
        match &self.window {
            ConfiguredWindow::Count(window) => window.window_size(),
            ConfiguredWindow::Duration(window) => window.window_size(),
        }
    }

    /// Check if the window is full
    pub fn window_full(&self) -> bool {
        match &self.window {
            ConfiguredWindow::Count(window) => window.window_full(),
            ConfiguredWindow::Duration(window) => window.window_full(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Return to the freshly constructed state
    pub fn clear(&mut self) {
        match &mut self.window {
            ConfiguredWindow::Count(window) => window.clear(),
            ConfiguredWindow::Duration(window) => window.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperatorKind;

    fn config(operator: OperatorKind, window: WindowSpec, emit: EmitPolicy) -> WindowConfig {
        WindowConfig {
            operator,
            window,
            emit,
        }
    }

    #[test]
    fn test_rolling_mean_when_full() {
        let mut agg = RollingAggregate::new(config(
            OperatorKind::Mean,
            WindowSpec::Count { size: 3 },
            EmitPolicy::WhenFull,
        ))
        .unwrap();

        let mut outputs = Vec::new();
        for v in [3.0, 6.0, 9.0, 12.0] {
            agg.push(v, None).unwrap();
            outputs.push(agg.output().unwrap());
        }
        assert_eq!(outputs, vec![None, None, Some(6.0), Some(9.0)]);
    }

    #[test]
    fn test_emit_always() {
        let mut agg = RollingAggregate::new(config(
            OperatorKind::Max,
            WindowSpec::Count { size: 10 },
            EmitPolicy::Always,
        ))
        .unwrap();
        assert_eq!(agg.output(), Err(RollingError::EmptyWindow));

        agg.push(4.0, None).unwrap();
        agg.push(2.0, None).unwrap();
        assert_eq!(agg.output().unwrap(), Some(4.0));
        assert!(!agg.window_full());
    }

    #[test]
    fn test_time_window_mean() {
        let mut agg = RollingAggregate::new(config(
            OperatorKind::Mean,
            WindowSpec::Duration { span: 1_000 },
            EmitPolicy::Always,
        ))
        .unwrap();

        agg.push(1.0, Some(0)).unwrap();
        agg.push(2.0, Some(500)).unwrap();
        agg.push(6.0, Some(1_000)).unwrap();
        assert_eq!(agg.window_size(), 2);
        assert!(agg.window_full());
        assert_eq!(agg.output().unwrap(), Some(4.0));
    }

    #[test]
    fn test_time_window_requires_time() {
        let mut agg = RollingAggregate::new(config(
            OperatorKind::Sum,
            WindowSpec::Duration { span: 10 },
            EmitPolicy::Always,
        ))
        .unwrap();
        assert_eq!(agg.push(1.0, None), Err(RollingError::MissingTime));

        agg.push(1.0, Some(5)).unwrap();
        assert!(matches!(
            agg.push(1.0, Some(4)),
            Err(RollingError::OutOfOrderTime { .. })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let result = RollingAggregate::new(config(
            OperatorKind::Sum,
            WindowSpec::Count { size: 0 },
            EmitPolicy::Always,
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_clear() {
        let mut agg = RollingAggregate::new(WindowConfig::default()).unwrap();
        for v in 0..25 {
            agg.push(v as f64, None).unwrap();
        }
        assert!(agg.window_full());
        assert_eq!(agg.output().unwrap(), Some(14.5));

        agg.clear();
        assert_eq!(agg.window_size(), 0);
        assert_eq!(agg.output().unwrap(), None);
    }
}
