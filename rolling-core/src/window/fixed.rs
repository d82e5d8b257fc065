//! Rolling window holding the most recent N values

use super::{RollingWindow, WindowedAssociativeOp};
use crate::{Result, RollingError};
use std::fmt;
use tracing::debug;

/// State necessary for accumulation over a rolling window of fixed size.
///
/// Until `size` values have been pushed the window simply grows; from then
/// on every push drops the oldest value.
#[derive(Clone)]
pub struct FixedWindowAssociativeOp<T, F> {
    window_state: WindowedAssociativeOp<T, F>,
    size: usize,
    /// How much of the window remains to be filled
    remaining_window: usize,
}

impl<T, F> FixedWindowAssociativeOp<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Create a new, empty window holding at most `size` values
    pub fn new(op: F, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(RollingError::InvalidWindowSize(size));
        }
        debug!(size, "Created fixed window");

        Ok(Self {
            // A and B together hold up to roughly twice the window
            window_state: WindowedAssociativeOp::with_capacity(op, size + 1),
            size,
            remaining_window: size,
        })
    }

    /// Add a value, dropping the oldest one iff the window is already full
    pub fn update_state(&mut self, value: T) -> &mut Self {
        let num_dropped = if self.remaining_window > 0 {
            self.remaining_window -= 1;
            0
        } else {
            1
        };

        self.window_state.push_and_drop(value, num_dropped);
        self
    }

    /// Check if `size` values have been pushed
    pub fn window_full(&self) -> bool {
        self.remaining_window == 0
    }

    /// Get the aggregate of every value currently in the window
    pub fn window_value(&self) -> Result<T> {
        self.window_state.window_value()
    }

    /// Get the number of values currently in the window
    pub fn window_size(&self) -> usize {
        self.window_state.window_size()
    }

    /// Get the configured window size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Return to the freshly constructed state
    pub fn clear(&mut self) {
        self.window_state.clear();
        self.remaining_window = self.size;
    }
}

impl<T, F> RollingWindow<T> for FixedWindowAssociativeOp<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    fn window_value(&self) -> Result<T> {
        FixedWindowAssociativeOp::window_value(self)
    }

    fn window_size(&self) -> usize {
        FixedWindowAssociativeOp::window_size(self)
    }
}

impl<T, F> Extend<T> for FixedWindowAssociativeOp<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.update_state(value);
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for FixedWindowAssociativeOp<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedWindowAssociativeOp")
            .field("window_state", &self.window_state)
            .field("size", &self.size)
            .field("remaining_window", &self.remaining_window)
            .finish()
    }
}
