//! Rolling Core - Sliding Window Aggregation Engine
//!
//! Computes a running aggregate of any binary associative operator (sum,
//! product, max, min, logical AND/OR, set union, concatenation, ...) over a
//! sliding window of a stream:
//! - O(1) amortized updates, O(1) queries
//! - No identity element and no commutativity required
//! - No subtraction, so no cancellation error in floating point sums
//!
//! # Architecture
//!
//! - **WindowedAssociativeOp**: Two-segment engine, the caller decides how
//!   many values leave the window on each push
//! - **FixedWindowAssociativeOp**: Count-bounded window over the last N values
//! - **TimeWindowAssociativeOp**: Duration-bounded window over timestamped values
//! - **RollingAggregate**: Runtime-configured `f64` window for tools and config files
//!
//! ```
//! use rolling_core::{ops, FixedWindowAssociativeOp};
//!
//! let mut state = FixedWindowAssociativeOp::new(ops::max, 3).unwrap();
//! for v in [1, 5, 2, 8, 3] {
//!     state.update_state(v);
//! }
//! assert_eq!(state.window_value().unwrap(), 8);
//! ```

pub mod aggregate;
pub mod iter;
pub mod ops;
pub mod window;

mod error;
mod types;

pub use aggregate::RollingAggregate;
pub use error::{Result, RollingError};
pub use iter::RollingExt;
pub use types::*;
pub use window::{
    FixedWindowAssociativeOp, RollingWindow, TimePoint, TimeWindowAssociativeOp,
    WindowedAssociativeOp,
};

/// Rolling version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod config {
    /// Window size used when a count window is configured without one
    pub const DEFAULT_WINDOW_SIZE: usize = 20;

    /// Initial buffer capacity for windows built without a size
    pub const DEFAULT_CAPACITY_HINT: usize = 64;
}
