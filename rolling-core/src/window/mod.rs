//! Sliding windows over associative operators
//!
//! - [`WindowedAssociativeOp`]: the general two-segment engine, the caller
//!   chooses how many values leave the window on every push
//! - [`FixedWindowAssociativeOp`]: holds the most recent N values
//! - [`TimeWindowAssociativeOp`]: holds the values observed within a duration

mod engine;
mod fixed;
mod time;
mod time_queue;
mod timeline;

pub use engine::WindowedAssociativeOp;
pub use fixed::FixedWindowAssociativeOp;
pub use time::TimeWindowAssociativeOp;
pub use time_queue::TimeQueue;
pub use timeline::TimePoint;

use crate::Result;

/// Read access shared by every window type
pub trait RollingWindow<T> {
    /// Get the aggregate of every value currently in the window
    fn window_value(&self) -> Result<T>;

    /// Get the number of values currently in the window
    fn window_size(&self) -> usize;

    /// Check if the window holds no values
    fn is_empty(&self) -> bool {
        self.window_size() == 0
    }
}
