//! General sliding window over a binary associative operator
//!
//! The window is kept in two segments:
//!
//! ```text
//!     [---- A ----)[------ B ------)
//!          <                       >   the window ends at the end of B
//!                                      and starts somewhere inside A
//! ```
//!
//! A holds suffix combinations of the values it was built from, so moving
//! the left edge forward only moves an index:
//!
//! ```text
//!     x_i + .. + x_j,   x_i+1 + .. + x_j,   ...,   x_j
//! ```
//!
//! B holds the raw values seen since A was built, in arrival order, along
//! with their running combination. When the left edge runs off the end of
//! A, B is folded into a new A and an empty B takes its place. Each value is
//! folded at most once per pass through B, which gives O(1) amortized
//! updates and O(L) space for a typical window length L.
//!
//! Nothing is ever subtracted from a running total. Every aggregate is a
//! direct combination of at most two stored values, so floating point error
//! stays bounded by the combination depth instead of the stream length, and
//! operators without an inverse (max, min, union) work the same as sums.

use super::RollingWindow;
use crate::{Result, RollingError};
use std::fmt;
use tracing::trace;

/// Segment A: suffix-combined values plus a reverse index into them
#[derive(Debug, Clone)]
struct CumulativeSegment<T> {
    /// `values[i]` combines, in order, every raw value from `i` to the end
    values: Vec<T>,
    /// Elements counted from the end of `values` that are still in the window
    live: usize,
}

impl<T> CumulativeSegment<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Combination of the in-window part of the segment
    fn head(&self) -> Option<&T> {
        if self.live == 0 {
            None
        } else {
            self.values.get(self.values.len() - self.live)
        }
    }

    /// True when the segment holds values but none of them are in the window
    fn is_exhausted(&self) -> bool {
        self.live == 0 && !self.values.is_empty()
    }

    fn clear(&mut self) {
        self.values.clear();
        self.live = 0;
    }
}

/// Segment B: raw values in arrival order and their running combination
#[derive(Debug, Clone)]
struct IncomingSegment<T> {
    values: Vec<T>,
    /// Left-to-right combination of `values`, `None` iff `values` is empty
    total: Option<T>,
}

impl<T: Clone> IncomingSegment<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            total: None,
        }
    }

    fn push<F>(&mut self, op: &F, value: T)
    where
        F: Fn(&T, &T) -> T,
    {
        self.total = Some(match self.total.take() {
            Some(total) => op(&total, &value),
            None => value.clone(),
        });
        self.values.push(value);
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn clear(&mut self) {
        self.values.clear();
        self.total = None;
    }
}

/// State of a windowed aggregation of a binary associative operator.
///
/// The operator may be any `Fn(&T, &T) -> T` that is associative. It does not
/// need to be commutative: values are always combined in arrival order. No
/// identity element is assumed, which is why querying an empty window is an
/// error rather than a default value.
///
/// This is the general primitive: the caller decides how many values leave
/// the window on each push. [`FixedWindowAssociativeOp`] and
/// [`TimeWindowAssociativeOp`] build count and time policies on top of it.
///
/// [`FixedWindowAssociativeOp`]: super::FixedWindowAssociativeOp
/// [`TimeWindowAssociativeOp`]: super::TimeWindowAssociativeOp
#[derive(Clone)]
pub struct WindowedAssociativeOp<T, F> {
    op: F,
    cumulative: CumulativeSegment<T>,
    incoming: IncomingSegment<T>,
}

impl<T, F> WindowedAssociativeOp<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Create a new, empty window
    pub fn new(op: F) -> Self {
        Self::with_capacity(op, 0)
    }

    /// Create a new, empty window with both segments pre-sized
    pub fn with_capacity(op: F, capacity: usize) -> Self {
        Self {
            op,
            cumulative: CumulativeSegment::with_capacity(capacity),
            incoming: IncomingSegment::with_capacity(capacity),
        }
    }

    /// Add `value` to the end of the window and drop `num_dropped_from_window`
    /// values from its start.
    ///
    /// The drop count is measured against the window as it was before this
    /// call, so the pushed value itself always remains. Asking for more than
    /// that fails with [`RollingError::DropCountExceeded`] and leaves the
    /// state untouched.
    pub fn update_state(&mut self, value: T, num_dropped_from_window: usize) -> Result<&mut Self> {
        let available = self.window_size();
        if num_dropped_from_window > available {
            return Err(RollingError::DropCountExceeded {
                requested: num_dropped_from_window,
                available,
            });
        }

        self.push_and_drop(value, num_dropped_from_window);
        Ok(self)
    }

    /// Unchecked form of [`update_state`](Self::update_state) for wrappers
    /// whose policy already guarantees the drop count is in range.
    pub(crate) fn push_and_drop(&mut self, value: T, num_dropped: usize) {
        debug_assert!(num_dropped <= self.window_size());

        self.incoming.push(&self.op, value);

        for _ in 0..num_dropped {
            // Drops that run past A continue from the front of B
            if self.cumulative.live == 0 {
                self.rotate();
            }
            self.cumulative.live -= 1;
        }

        if self.cumulative.is_exhausted() {
            self.rotate();
        }
    }

    /// Fold B into a new A of suffix combinations and start an empty B
    fn rotate(&mut self) {
        let cumulative = &mut self.cumulative.values;
        cumulative.clear();

        for value in self.incoming.values.iter().rev() {
            let suffix = match cumulative.last() {
                Some(rest) => (self.op)(value, rest),
                None => value.clone(),
            };
            cumulative.push(suffix);
        }
        cumulative.reverse();

        self.cumulative.live = cumulative.len();
        self.incoming.clear();

        trace!(len = self.cumulative.live, "Rotated incoming segment");
    }

    /// Get the aggregate of every value currently in the window
    pub fn window_value(&self) -> Result<T> {
        match (self.cumulative.head(), self.incoming.total.as_ref()) {
            (Some(head), Some(total)) => Ok((self.op)(head, total)),
            (Some(head), None) => Ok(head.clone()),
            (None, Some(total)) => Ok(total.clone()),
            (None, None) => Err(RollingError::EmptyWindow),
        }
    }

    /// Get the number of values currently in the window
    pub fn window_size(&self) -> usize {
        self.cumulative.live + self.incoming.len()
    }

    /// Check if the window holds no values
    pub fn is_empty(&self) -> bool {
        self.window_size() == 0
    }

    /// Drop every value, keeping the allocated buffers
    pub fn clear(&mut self) {
        self.cumulative.clear();
        self.incoming.clear();
    }
}

impl<T, F> RollingWindow<T> for WindowedAssociativeOp<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    fn window_value(&self) -> Result<T> {
        WindowedAssociativeOp::window_value(self)
    }

    fn window_size(&self) -> usize {
        WindowedAssociativeOp::window_size(self)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for WindowedAssociativeOp<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowedAssociativeOp")
            .field("cumulative", &self.cumulative)
            .field("incoming", &self.incoming)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::VecDeque;

    fn concat(a: &String, b: &String) -> String {
        format!("{a}{b}")
    }

    fn add(a: &i64, b: &i64) -> i64 {
        a + b
    }

    #[test]
    fn test_empty_window() {
        let state = WindowedAssociativeOp::new(add);
        assert_eq!(state.window_size(), 0);
        assert!(state.is_empty());
        assert_eq!(state.window_value(), Err(RollingError::EmptyWindow));
    }

    #[test]
    fn test_push_without_drops() {
        let mut state = WindowedAssociativeOp::new(add);
        for v in 1..=5 {
            state.update_state(v, 0).unwrap();
        }
        assert_eq!(state.window_size(), 5);
        assert_eq!(state.window_value(), Ok(15));
    }

    #[test]
    fn test_update_state_chains() {
        let mut state = WindowedAssociativeOp::new(add);
        let size = state
            .update_state(1, 0)
            .unwrap()
            .update_state(2, 0)
            .unwrap()
            .window_size();
        assert_eq!(size, 2);
    }

    #[test]
    fn test_drop_count_exceeded_leaves_state_untouched() {
        let mut state = WindowedAssociativeOp::new(add);
        state.update_state(1, 0).unwrap();
        state.update_state(2, 0).unwrap();

        let err = state.update_state(3, 3).unwrap_err();
        assert_eq!(
            err,
            RollingError::DropCountExceeded {
                requested: 3,
                available: 2
            }
        );
        assert_eq!(state.window_size(), 2);
        assert_eq!(state.window_value(), Ok(3));
    }

    #[test]
    fn test_drop_on_empty_window_fails() {
        let mut state = WindowedAssociativeOp::new(add);
        assert!(state.update_state(1, 1).is_err());
        assert!(state.is_empty());
    }

    #[test]
    fn test_drop_entire_previous_window() {
        let mut state = WindowedAssociativeOp::new(add);
        for v in [10, 20, 30] {
            state.update_state(v, 0).unwrap();
        }
        state.update_state(4, 3).unwrap();
        assert_eq!(state.window_size(), 1);
        assert_eq!(state.window_value(), Ok(4));
    }

    #[test]
    fn test_drops_spanning_both_segments() {
        let mut state = WindowedAssociativeOp::new(concat);
        for s in ["a", "b", "c"] {
            state.update_state(s.to_string(), 0).unwrap();
        }
        // First drop rotates a, b, c, d into A
        state.update_state("d".to_string(), 1).unwrap();
        assert_eq!(state.window_value().unwrap(), "bcd");

        state.update_state("e".to_string(), 0).unwrap();
        state.update_state("f".to_string(), 0).unwrap();
        // b, c, d live in A, e, f in B: dropping four reaches into B
        state.update_state("g".to_string(), 4).unwrap();
        assert_eq!(state.window_size(), 2);
        assert_eq!(state.window_value().unwrap(), "fg");
    }

    #[test]
    fn test_order_preserved_across_rotations() {
        let mut state = WindowedAssociativeOp::new(concat);
        let letters: Vec<String> = "abcdefghijklmnop".chars().map(String::from).collect();

        for (i, letter) in letters.iter().enumerate() {
            let dropped = if i >= 3 { 1 } else { 0 };
            state.update_state(letter.clone(), dropped).unwrap();

            let start = i.saturating_sub(2);
            let expected: String = letters[start..=i].concat();
            assert_eq!(state.window_value().unwrap(), expected);
        }
    }

    #[test]
    fn test_random_drops_match_naive() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut state = WindowedAssociativeOp::new(concat);
        let mut naive: VecDeque<String> = VecDeque::new();

        for i in 0..2_000 {
            let value = format!("{},", i % 97);
            let dropped = rng.gen_range(0..=naive.len().min(4));

            state.update_state(value.clone(), dropped).unwrap();
            naive.push_back(value);
            for _ in 0..dropped {
                naive.pop_front();
            }

            assert_eq!(state.window_size(), naive.len());
            let expected: String = naive.iter().map(String::as_str).collect();
            assert_eq!(state.window_value().unwrap(), expected);
        }
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut state = WindowedAssociativeOp::new(concat);
        for s in ["x", "y", "z"] {
            state.update_state(s.to_string(), 0).unwrap();
        }
        state.update_state("w".to_string(), 2).unwrap();

        let first = (state.window_value(), state.window_size());
        let second = (state.window_value(), state.window_size());
        assert_eq!(first, second);
        assert_eq!(first.0.unwrap(), "zw");
    }

    #[test]
    fn test_space_stays_bounded() {
        let window = 8;
        let mut state = WindowedAssociativeOp::new(add);
        for v in 0..1_000 {
            let dropped = if state.window_size() == window { 1 } else { 0 };
            state.update_state(v, dropped).unwrap();
            let stored = state.cumulative.values.len() + state.incoming.len();
            assert!(stored <= 2 * window + 1, "stored {stored} values");
        }
    }

    #[test]
    fn test_clear() {
        let mut state = WindowedAssociativeOp::new(add);
        for v in 0..10 {
            state.update_state(v, if v > 3 { 1 } else { 0 }).unwrap();
        }
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.window_value(), Err(RollingError::EmptyWindow));

        state.update_state(7, 0).unwrap();
        assert_eq!(state.window_value(), Ok(7));
    }

    #[test]
    fn test_debug_omits_operator() {
        let mut state = WindowedAssociativeOp::new(add);
        state.update_state(1, 0).unwrap();
        let debug = format!("{:?}", state);
        assert!(debug.starts_with("WindowedAssociativeOp"));
        assert!(debug.contains("incoming"));
    }
}
