//! Deferred delivery of responses.
//!
//! Every response is stamped with a release time when it is enqueued. A
//! [`ResponseQueue::poll`] hands all responses whose release time has come
//! to a visitor, in enqueue order, and keeps the rest for later polls.
//! Delivery is never synchronous: even a zero-delay response waits for the
//! next poll.

use crate::clock::SimClock;
use crate::fixed::Millis;
use crate::response::Response;
use std::collections::VecDeque;

/// A response waiting for its release time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingResponse {
    pub response: Response,
    pub release_at: Millis,
}

/// FIFO queue of responses with simulated release times.
///
/// Supports optional history tracking of delivered responses.
#[derive(Debug, Default)]
pub struct ResponseQueue {
    clock: SimClock,
    /// Responses in enqueue order.
    pending: VecDeque<PendingResponse>,
    /// Delivered responses: (delivery time, response).
    history: Vec<(Millis, Response)>,
    /// Maximum history entries to retain. 0 = no history.
    max_history: usize,
}

impl ResponseQueue {
    /// Create a new empty queue with no history tracking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new queue that retains up to `max_history` delivered responses.
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            max_history,
            ..Self::default()
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Queue `response` for release `delay` milliseconds from now.
    pub fn enqueue(&mut self, response: Response, delay: Millis) {
        let release_at = self.clock.deadline(delay);
        tracing::trace!(kind = ?response.kind(), release_at, "response queued");
        self.pending.push_back(PendingResponse {
            response,
            release_at,
        });
    }

    /// Advance the clock to `now` and pass every due response to `visitor`
    /// in enqueue order. Responses that are not yet due stay queued, in their
    /// original relative order. Returns the number of responses delivered.
    pub fn poll<F>(&mut self, now: Millis, mut visitor: F) -> usize
    where
        F: FnMut(Response),
    {
        let now = self.clock.advance_to(now);
        let mut kept = VecDeque::with_capacity(self.pending.len());
        let mut delivered = 0;

        for pending in self.pending.drain(..) {
            if pending.release_at > now {
                kept.push_back(pending);
                continue;
            }
            tracing::trace!(kind = ?pending.response.kind(), now, "response released");
            if self.max_history > 0 {
                self.history.push((now, pending.response.clone()));
            }
            visitor(pending.response);
            delivered += 1;
        }
        self.pending = kept;

        let excess = self.history.len().saturating_sub(self.max_history);
        if excess > 0 {
            self.history.drain(..excess);
        }

        delivered
    }

    /// Advance the clock by `dt`, then [`poll`](Self::poll) at the new time.
    pub fn advance<F>(&mut self, dt: Millis, visitor: F) -> usize
    where
        F: FnMut(Response),
    {
        let now = self.clock.advance_by(dt);
        self.poll(now, visitor)
    }

    /// Number of responses waiting for release.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether the queue has no pending responses.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending responses in enqueue order.
    pub fn pending(&self) -> impl Iterator<Item = &PendingResponse> {
        self.pending.iter()
    }

    /// Delivered responses, oldest first.
    pub fn history(&self) -> &[(Millis, Response)] {
        &self.history
    }

    /// Clear all history entries.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
