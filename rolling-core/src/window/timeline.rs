//! Time types usable as observation timestamps

use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::time::{Duration, Instant, SystemTime};

/// A point in time that a [`TimeWindowAssociativeOp`] can order and measure.
///
/// Implementors only need a total order over the timestamps actually pushed
/// and a way to measure the span between two of them.
///
/// [`TimeWindowAssociativeOp`]: super::TimeWindowAssociativeOp
pub trait TimePoint: PartialOrd + Clone + Debug {
    /// Difference between two points in time
    type Span: PartialOrd + Clone + Debug;

    /// The empty span
    fn zero_span() -> Self::Span;

    /// Span from `earlier` to `self`; never called with `earlier > self`
    fn span_since(&self, earlier: &Self) -> Self::Span;
}

impl TimePoint for i64 {
    type Span = i64;

    fn zero_span() -> i64 {
        0
    }

    fn span_since(&self, earlier: &Self) -> i64 {
        self.saturating_sub(*earlier)
    }
}

impl TimePoint for u64 {
    type Span = u64;

    fn zero_span() -> u64 {
        0
    }

    fn span_since(&self, earlier: &Self) -> u64 {
        self.saturating_sub(*earlier)
    }
}

impl TimePoint for f64 {
    type Span = f64;

    fn zero_span() -> f64 {
        0.0
    }

    fn span_since(&self, earlier: &Self) -> f64 {
        self - earlier
    }
}

impl TimePoint for Instant {
    type Span = Duration;

    fn zero_span() -> Duration {
        Duration::ZERO
    }

    fn span_since(&self, earlier: &Self) -> Duration {
        self.saturating_duration_since(*earlier)
    }
}

impl TimePoint for SystemTime {
    type Span = Duration;

    fn zero_span() -> Duration {
        Duration::ZERO
    }

    fn span_since(&self, earlier: &Self) -> Duration {
        self.duration_since(*earlier).unwrap_or(Duration::ZERO)
    }
}

impl TimePoint for DateTime<Utc> {
    type Span = chrono::Duration;

    fn zero_span() -> chrono::Duration {
        chrono::Duration::zero()
    }

    fn span_since(&self, earlier: &Self) -> chrono::Duration {
        self.signed_duration_since(*earlier)
    }
}
