//! Ring buffer of observation timestamps
//!
//! Timestamps enter at the back and expire from the front, so a `VecDeque`
//! gives O(1) push and eviction over a single reused allocation.

use super::TimePoint;
use std::collections::VecDeque;

/// Queue of timestamps, oldest first
#[derive(Debug, Clone)]
pub struct TimeQueue<Ts> {
    buffer: VecDeque<Ts>,
}

impl<Ts: TimePoint> TimeQueue<Ts> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
        }
    }

    /// Create with capacity hint
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    /// Append the newest timestamp
    pub fn push_back(&mut self, time: Ts) {
        self.buffer.push_back(time);
    }

    /// Remove every timestamp at least `span` older than `now`, returning how
    /// many were removed
    pub fn evict_expired(&mut self, now: &Ts, span: &Ts::Span) -> usize {
        let mut evicted = 0;
        while let Some(oldest) = self.buffer.front() {
            if now.span_since(oldest) >= *span {
                self.buffer.pop_front();
                evicted += 1;
            } else {
                break;
            }
        }
        evicted
    }

    /// Get the oldest timestamp
    pub fn front(&self) -> Option<&Ts> {
        self.buffer.front()
    }

    /// Get the newest timestamp
    pub fn back(&self) -> Option<&Ts> {
        self.buffer.back()
    }

    /// Get entry count
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Remove every timestamp
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Ts> {
        self.buffer.iter()
    }
}

impl<Ts: TimePoint> Default for TimeQueue<Ts> {
    fn default() -> Self {
        Self::new()
    }
}
