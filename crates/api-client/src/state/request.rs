//! Immediate and lazy request state holders

use super::StateCell;
use crate::error::{ApiError, ApiResult};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Snapshot of a request's progress
///
/// Starts idle. A run sets `loading` and clears `error`; success stores
/// `data`; failure stores `error` and keeps whatever `data` an earlier run
/// produced.
#[derive(Debug, Clone)]
pub struct RequestState<T> {
    /// Last successful result
    pub data: Option<T>,
    /// Whether a run is in flight
    pub loading: bool,
    /// Error from the last run, if it failed
    pub error: Option<Arc<ApiError>>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> RequestState<T> {
    /// Nothing has run yet
    pub fn is_idle(&self) -> bool {
        !self.loading && self.data.is_none() && self.error.is_none()
    }

    /// Error message from the last run, if it failed
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish(&mut self, result: ApiResult<T>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => self.error = Some(Arc::new(e)),
        }
        self.loading = false;
    }
}

// ============================================================================
// Query
// ============================================================================

struct QueryInner<T, F, D> {
    cell: StateCell<RequestState<T>>,
    fetch: F,
    deps: Mutex<Option<D>>,
}

/// Request that runs on mount and again when its dependencies change
///
/// Clones share state, so a clone can be moved into a spawned task.
///
/// ```rust,no_run
/// use xeluxe_api_client::{state::Query, XeluxeClient};
///
/// # async fn run(client: XeluxeClient) {
/// let services = client.services();
/// let page = Query::new(move |slug: String| {
///     let services = services.clone();
///     async move { services.by_slug(&slug).await }
/// });
///
/// page.mount("fire-audits".to_string()).await;
/// # }
/// ```
pub struct Query<T, F, D = ()> {
    inner: Arc<QueryInner<T, F, D>>,
}

impl<T, F, D> Clone for Query<T, F, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, F, D> fmt::Debug for Query<T, F, D>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("state", &*self.inner.cell.tx.borrow())
            .finish_non_exhaustive()
    }
}

impl<T, F, Fut, D> Query<T, F, D>
where
    T: Clone,
    F: Fn(D) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
    D: Clone + PartialEq,
{
    /// Create an idle query around `fetch`, which receives the current
    /// dependencies on every run
    pub fn new(fetch: F) -> Self {
        Self {
            inner: Arc::new(QueryInner {
                cell: StateCell::new(RequestState::default()),
                fetch,
                deps: Mutex::new(None),
            }),
        }
    }

    /// Current state
    pub fn state(&self) -> RequestState<T> {
        self.inner.cell.snapshot()
    }

    /// Receiver that observes every state transition
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.inner.cell.subscribe()
    }

    /// Run if this is the first mount or `deps` differs from the last
    /// mounted value. Returns whether a run happened.
    pub async fn mount(&self, deps: D) -> bool {
        {
            let mut current = self.inner.deps.lock().unwrap_or_else(PoisonError::into_inner);
            if current.as_ref() == Some(&deps) {
                return false;
            }
            *current = Some(deps.clone());
        }

        self.run(deps).await;
        true
    }

    /// Run again with the last mounted dependencies.
    ///
    /// Does nothing before the first [`Query::mount`].
    pub async fn refetch(&self) -> RequestState<T> {
        let deps = self
            .inner
            .deps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(deps) = deps {
            self.run(deps).await;
        }
        self.state()
    }

    /// Drop the outcome of any in-flight run, as when the consumer goes away
    pub fn discard_pending(&self) {
        self.inner.cell.invalidate(|state| state.loading = false);
    }

    async fn run(&self, deps: D) {
        let generation = self.inner.cell.begin(RequestState::start);
        let result = (self.inner.fetch)(deps).await;
        self.inner
            .cell
            .settle(generation, |state| state.finish(result));
    }
}

impl<T, F, Fut, D> Query<T, F, D>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(D) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<T>> + Send + 'static,
    D: Clone + PartialEq + Send + 'static,
{
    /// [`Query::refetch`] on a Tokio task
    pub fn spawn_refetch(&self) -> JoinHandle<RequestState<T>> {
        let query = self.clone();
        tokio::spawn(async move { query.refetch().await })
    }

    /// [`Query::mount`] on a Tokio task
    pub fn spawn_mount(&self, deps: D) -> JoinHandle<bool> {
        let query = self.clone();
        tokio::spawn(async move { query.mount(deps).await })
    }
}

// ============================================================================
// LazyQuery
// ============================================================================

struct LazyInner<T, F> {
    cell: StateCell<RequestState<T>>,
    fetch: F,
}

/// Request that runs only when executed
pub struct LazyQuery<T, P, F> {
    inner: Arc<LazyInner<T, F>>,
    _params: std::marker::PhantomData<fn(P)>,
}

impl<T, P, F> Clone for LazyQuery<T, P, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _params: std::marker::PhantomData,
        }
    }
}

impl<T, P, F, Fut> LazyQuery<T, P, F>
where
    T: Clone,
    F: Fn(P) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    /// Create an idle lazy query around `fetch`
    pub fn new(fetch: F) -> Self {
        Self {
            inner: Arc::new(LazyInner {
                cell: StateCell::new(RequestState::default()),
                fetch,
            }),
            _params: std::marker::PhantomData,
        }
    }

    /// Current state
    pub fn state(&self) -> RequestState<T> {
        self.inner.cell.snapshot()
    }

    /// Receiver that observes every state transition
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.inner.cell.subscribe()
    }

    /// Run with `params` and return the resulting state.
    ///
    /// If a later run started meanwhile, this run's outcome is dropped and
    /// the returned state is whatever the later run has published.
    pub async fn execute(&self, params: P) -> RequestState<T> {
        let generation = self.inner.cell.begin(RequestState::start);
        let result = (self.inner.fetch)(params).await;
        self.inner
            .cell
            .settle(generation, |state| state.finish(result));
        self.state()
    }

    /// Drop the outcome of any in-flight run
    pub fn discard_pending(&self) {
        self.inner.cell.invalidate(|state| state.loading = false);
    }
}

impl<T, P, F, Fut> LazyQuery<T, P, F>
where
    T: Clone + Send + Sync + 'static,
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<T>> + Send + 'static,
{
    /// [`LazyQuery::execute`] on a Tokio task
    pub fn spawn_execute(&self, params: P) -> JoinHandle<RequestState<T>> {
        let query = self.clone();
        tokio::spawn(async move { query.execute(params).await })
    }
}
