//! Submission (mutation) state holder

use super::StateCell;
use crate::error::{ApiError, ApiResult};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Snapshot of a submission's progress
#[derive(Debug, Clone)]
pub struct SubmissionState<T> {
    /// Server reply to the last successful submission
    pub data: Option<T>,
    /// Whether a submission is in flight
    pub loading: bool,
    /// Error from the last submission, if it failed
    pub error: Option<Arc<ApiError>>,
    /// Whether the last submission succeeded
    pub success: bool,
}

impl<T> Default for SubmissionState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            success: false,
        }
    }
}

impl<T> SubmissionState<T> {
    /// Error message from the last submission, if it failed
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

struct MutationInner<T, F> {
    cell: StateCell<SubmissionState<T>>,
    submit: F,
}

/// Holder for a user-triggered write, such as a form submission
pub struct Mutation<T, P, F> {
    inner: Arc<MutationInner<T, F>>,
    _params: PhantomData<fn(P)>,
}

impl<T, P, F> Clone for Mutation<T, P, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _params: PhantomData,
        }
    }
}

impl<T, P, F, Fut> Mutation<T, P, F>
where
    T: Clone,
    F: Fn(P) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    /// Create an idle mutation around `submit`
    pub fn new(submit: F) -> Self {
        Self {
            inner: Arc::new(MutationInner {
                cell: StateCell::new(SubmissionState::default()),
                submit,
            }),
            _params: PhantomData,
        }
    }

    /// Current state
    pub fn state(&self) -> SubmissionState<T> {
        self.inner.cell.snapshot()
    }

    /// Receiver that observes every state transition
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState<T>> {
        self.inner.cell.subscribe()
    }

    /// Submit `params` and return the resulting state
    pub async fn submit(&self, params: P) -> SubmissionState<T> {
        let generation = self.inner.cell.begin(|state| {
            state.loading = true;
            state.error = None;
            state.success = false;
        });

        let result = (self.inner.submit)(params).await;

        self.inner.cell.settle(generation, |state| {
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.success = true;
                }
                Err(e) => {
                    state.error = Some(Arc::new(e));
                    state.success = false;
                }
            }
            state.loading = false;
        });

        self.state()
    }

    /// Return to the initial state; a submission still in flight is
    /// ignored when it settles
    pub fn reset(&self) {
        self.inner
            .cell
            .invalidate(|state| *state = SubmissionState::default());
    }
}

impl<T, P, F, Fut> Mutation<T, P, F>
where
    T: Clone + Send + Sync + 'static,
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<T>> + Send + 'static,
{
    /// [`Mutation::submit`] on a Tokio task
    pub fn spawn_submit(&self, params: P) -> JoinHandle<SubmissionState<T>> {
        let mutation = self.clone();
        tokio::spawn(async move { mutation.submit(params).await })
    }
}
