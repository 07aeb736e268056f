// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded tap buffer between the input thread and the frame loop.
//!
//! Taps arrive on the input thread but anchors can only be created inside
//! the once-per-frame reconciliation, so tap events cross threads through
//! this queue. It is the *only* shared structure between the two sides:
//! bounded, lock-free, with a non-blocking offer that drops the newest event
//! when full and a non-blocking poll that returns `None` when empty. Taps
//! are low-frequency relative to frame rate, so lossy delivery is fine.

use core::sync::atomic::{AtomicU64, Ordering};

use crossbeam_queue::ArrayQueue;
use kurbo::Point;

/// Capacity of the [`TapQueue`].
pub const TAP_QUEUE_CAPACITY: usize = 16;

/// A single-tap event captured on touch-up.
///
/// Consumed at most once by the frame loop, or silently dropped when the
/// queue is full or no object type is selected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapEvent {
    /// Screen-space tap position in pixels.
    pub position: Point,
    /// Monotonic timestamp of the touch-up, in nanoseconds.
    pub timestamp_ns: u64,
}

/// Bounded single-producer/single-consumer tap buffer.
///
/// `offer` and `poll` never block; both sides may safely race. The queue
/// counts dropped offers for diagnostics.
#[derive(Debug)]
pub struct TapQueue {
    items: ArrayQueue<TapEvent>,
    dropped: AtomicU64,
}

impl Default for TapQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TapQueue {
    /// Creates an empty queue with [`TAP_QUEUE_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: ArrayQueue::new(TAP_QUEUE_CAPACITY),
            dropped: AtomicU64::new(0),
        }
    }

    /// Enqueues a tap if there is space. The tap is lost if the queue is
    /// full; returns whether it was retained.
    pub fn offer(&self, tap: TapEvent) -> bool {
        match self.items.push(tap) {
            Ok(()) => true,
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Dequeues the oldest pending tap, if any.
    pub fn poll(&self) -> Option<TapEvent> {
        self.items.pop()
    }

    /// Number of pending taps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no taps are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of taps dropped because the queue was full.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(n: u64) -> TapEvent {
        TapEvent {
            position: Point::new(n as f64, n as f64),
            timestamp_ns: n,
        }
    }

    #[test]
    fn seventeen_offers_retain_sixteen_fifo() {
        let queue = TapQueue::new();
        for n in 0..17 {
            queue.offer(tap(n));
        }
        assert_eq!(queue.len(), TAP_QUEUE_CAPACITY);
        assert_eq!(queue.dropped_count(), 1);
        // FIFO order preserved; the 17th (newest) was the one dropped.
        for n in 0..16 {
            assert_eq!(queue.poll(), Some(tap(n)));
        }
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn offer_reports_drop() {
        let queue = TapQueue::new();
        for n in 0..16 {
            assert!(queue.offer(tap(n)));
        }
        assert!(!queue.offer(tap(16)));
    }

    #[test]
    fn empty_poll_returns_none() {
        let queue = TapQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.poll(), None);
    }
}
