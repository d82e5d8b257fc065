//! Iterator adaptors running a stream through a rolling window
//!
//! ```
//! use rolling_core::{ops, RollingExt};
//!
//! let sums: Vec<Option<i32>> = [1, 2, 3, 4]
//!     .into_iter()
//!     .rolling_fixed(2, ops::sum)
//!     .unwrap()
//!     .collect();
//! assert_eq!(sums, vec![None, Some(3), Some(5), Some(7)]);
//! ```

use crate::window::{FixedWindowAssociativeOp, TimePoint, TimeWindowAssociativeOp};
use crate::Result;

/// Extension trait adding rolling windows to every iterator
pub trait RollingExt: Iterator + Sized {
    /// Aggregate over the most recent `size` items. Yields `None` until the
    /// window has filled, then the aggregate after every item.
    fn rolling_fixed<F>(self, size: usize, op: F) -> Result<RollingFixed<Self, F>>
    where
        Self::Item: Clone,
        F: Fn(&Self::Item, &Self::Item) -> Self::Item,
    {
        Ok(RollingFixed {
            iter: self,
            window: FixedWindowAssociativeOp::new(op, size)?,
        })
    }

    /// Aggregate `(time, value)` items over a window of duration `span`,
    /// yielding the aggregate after every item.
    fn rolling_time<T, Ts, F>(self, span: Ts::Span, op: F) -> Result<RollingTime<Self, T, Ts, F>>
    where
        Self: Iterator<Item = (Ts, T)>,
        T: Clone,
        Ts: TimePoint,
        F: Fn(&T, &T) -> T,
    {
        Ok(RollingTime {
            iter: self,
            window: TimeWindowAssociativeOp::new(op, span)?,
        })
    }
}

impl<I: Iterator> RollingExt for I {}

/// Iterator returned by [`RollingExt::rolling_fixed`]
pub struct RollingFixed<I: Iterator, F> {
    iter: I,
    window: FixedWindowAssociativeOp<I::Item, F>,
}

impl<I, F> Iterator for RollingFixed<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: Fn(&I::Item, &I::Item) -> I::Item,
{
    type Item = Option<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.iter.next()?;
        self.window.update_state(value);

        if self.window.window_full() {
            Some(self.window.window_value().ok())
        } else {
            Some(None)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Iterator returned by [`RollingExt::rolling_time`]
pub struct RollingTime<I, T, Ts: TimePoint, F> {
    iter: I,
    window: TimeWindowAssociativeOp<T, Ts, F>,
}

impl<I, T, Ts, F> Iterator for RollingTime<I, T, Ts, F>
where
    I: Iterator<Item = (Ts, T)>,
    T: Clone,
    Ts: TimePoint,
    F: Fn(&T, &T) -> T,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (time, value) = self.iter.next()?;
        Some(
            self.window
                .update_state(value, time)
                .and_then(|window| window.window_value()),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
