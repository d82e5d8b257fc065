//! Rolling window holding the values observed within a duration

use super::{RollingWindow, TimePoint, TimeQueue, WindowedAssociativeOp};
use crate::config::DEFAULT_CAPACITY_HINT;
use crate::{Result, RollingError};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

/// State necessary for accumulation over a rolling window of fixed duration.
///
/// An observation leaves the window once its age reaches the window
/// duration: after a push at time `t`, the window holds exactly the
/// observations with timestamps in `(t - duration, t]`.
#[derive(Clone)]
pub struct TimeWindowAssociativeOp<T, Ts: TimePoint, F> {
    window_state: WindowedAssociativeOp<T, F>,
    window_duration: Ts::Span,
    /// One timestamp per value held by `window_state`
    times: TimeQueue<Ts>,
    /// Set once any observation has left the window, never cleared by pushes
    window_full: bool,
}

impl<T, Ts, F> TimeWindowAssociativeOp<T, Ts, F>
where
    T: Clone,
    Ts: TimePoint,
    F: Fn(&T, &T) -> T,
{
    /// Create a new, empty window spanning `window_duration`
    pub fn new(op: F, window_duration: Ts::Span) -> Result<Self> {
        match window_duration.partial_cmp(&Ts::zero_span()) {
            Some(Ordering::Equal | Ordering::Greater) => {}
            // Negative, or unordered like NaN
            _ => {
                return Err(RollingError::InvalidWindowDuration(format!(
                    "{:?}",
                    window_duration
                )))
            }
        }
        debug!(duration = ?window_duration, "Created time window");

        Ok(Self {
            window_state: WindowedAssociativeOp::with_capacity(op, DEFAULT_CAPACITY_HINT),
            window_duration,
            times: TimeQueue::with_capacity(DEFAULT_CAPACITY_HINT),
            window_full: false,
        })
    }

    /// Add a value observed at `time`, evicting every observation whose age
    /// has reached the window duration.
    ///
    /// `time` must not be earlier than any time already pushed; otherwise
    /// this fails with [`RollingError::OutOfOrderTime`] and the state is
    /// left untouched. A time that doesn't compare with itself (a NaN `f64`)
    /// fails with [`RollingError::UnorderedTime`].
    pub fn update_state(&mut self, value: T, time: Ts) -> Result<&mut Self> {
        if time.partial_cmp(&time).is_none() {
            return Err(RollingError::UnorderedTime(format!("{:?}", time)));
        }
        if let Some(latest) = self.times.back() {
            match time.partial_cmp(latest) {
                Some(Ordering::Equal | Ordering::Greater) => {}
                _ => {
                    return Err(RollingError::OutOfOrderTime {
                        previous: format!("{:?}", latest),
                        current: format!("{:?}", time),
                    })
                }
            }
        }

        let num_dropped = self.times.evict_expired(&time, &self.window_duration);
        self.times.push_back(time);

        if num_dropped > 0 {
            trace!(num_dropped, "Evicted expired observations");
            self.window_full = true;
        }

        self.window_state.push_and_drop(value, num_dropped);
        Ok(self)
    }

    /// Check if at least one observation has dropped out of the window.
    ///
    /// The flag is sticky: a long gap between observations can leave the
    /// window holding a single value while this still returns true.
    pub fn window_full(&self) -> bool {
        self.window_full
    }

    /// Get the aggregate of every value currently in the window
    pub fn window_value(&self) -> Result<T> {
        self.window_state.window_value()
    }

    /// Get the number of values currently in the window
    pub fn window_size(&self) -> usize {
        self.window_state.window_size()
    }

    /// Get the configured window duration
    pub fn window_duration(&self) -> &Ts::Span {
        &self.window_duration
    }

    /// Get the timestamp of the oldest value in the window
    pub fn oldest_time(&self) -> Option<&Ts> {
        self.times.front()
    }

    /// Get the timestamp of the newest value in the window
    pub fn latest_time(&self) -> Option<&Ts> {
        self.times.back()
    }

    /// Return to the freshly constructed state, including the full flag
    pub fn clear(&mut self) {
        self.window_state.clear();
        self.times.clear();
        self.window_full = false;
    }
}

impl<T, Ts, F> RollingWindow<T> for TimeWindowAssociativeOp<T, Ts, F>
where
    T: Clone,
    Ts: TimePoint,
    F: Fn(&T, &T) -> T,
{
    fn window_value(&self) -> Result<T> {
        TimeWindowAssociativeOp::window_value(self)
    }

    fn window_size(&self) -> usize {
        TimeWindowAssociativeOp::window_size(self)
    }
}

impl<T: fmt::Debug, Ts: TimePoint, F> fmt::Debug for TimeWindowAssociativeOp<T, Ts, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeWindowAssociativeOp")
            .field("window_state", &self.window_state)
            .field("window_duration", &self.window_duration)
            .field("times", &self.times)
            .field("window_full", &self.window_full)
            .finish()
    }
}
