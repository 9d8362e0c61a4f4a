//! Observable request state
//!
//! State holders wrap an async API call and publish its progress through a
//! [`tokio::sync::watch`] channel:
//!
//! - [`Query`]: runs when mounted and whenever its dependencies change
//! - [`LazyQuery`]: runs only when executed, with per-call parameters
//! - [`Mutation`]: form submissions, with a `success` flag and `reset`
//!
//! Every invocation takes a generation number. When a settlement arrives
//! for a generation that is no longer the latest, it is dropped, so the
//! state always reflects the most recent invocation.

pub mod request;
pub mod submission;

pub use request::{LazyQuery, Query, RequestState};
pub use submission::{Mutation, SubmissionState};

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::debug;

/// Watch channel plus the generation counter guarding it
pub(crate) struct StateCell<S> {
    tx: watch::Sender<S>,
    generation: AtomicU64,
}

impl<S> StateCell<S> {
    pub(crate) fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            generation: AtomicU64::new(0),
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    pub(crate) fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Start a new generation and apply `start` to the state
    pub(crate) fn begin(&self, start: impl FnOnce(&mut S)) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            start(state);
        });
        generation
    }

    /// Apply `finish` if `generation` is still the latest.
    ///
    /// Returns whether the settlement was applied.
    pub(crate) fn settle(&self, generation: u64, finish: impl FnOnce(&mut S)) -> bool {
        self.tx.send_if_modified(|state| {
            let latest = self.generation.load(Ordering::SeqCst);
            if latest != generation {
                debug!(generation, latest, "Discarding stale settlement");
                return false;
            }
            finish(state);
            true
        })
    }

    /// Start a new generation without a request and apply `update`
    pub(crate) fn invalidate(&self, update: impl FnOnce(&mut S)) {
        self.tx.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            update(state);
        });
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
