//! Per-screen fetch state: Loading → {Ready, Error}, terminal until remount.
//!
//! `ScreenController` owns one screen's state and the cancellation token of its
//! current mount. A new mount cancels the previous one (last mount wins) and
//! unmount cancels the current one, so late results never land.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Fetch state of a data-driven screen.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> FetchState<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => FetchState::Ready(payload),
            Err(e) => FetchState::Error(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Payload, only in Ready
    pub fn payload(&self) -> Option<&T> {
        match self {
            FetchState::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    /// Message, only in Error
    pub fn message(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Payloads that can be empty (an empty result is not an error).
pub trait IsEmpty {
    fn is_empty_payload(&self) -> bool;
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for [T] {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T: IsEmpty> IsEmpty for Option<T> {
    fn is_empty_payload(&self) -> bool {
        self.as_ref().map_or(true, IsEmpty::is_empty_payload)
    }
}

/// What a screen renders. A pure function of [`FetchState`].
#[derive(Debug, PartialEq)]
pub enum ScreenView<'a, T> {
    Spinner,
    Failed(&'a str),
    /// Ready with nothing to show: empty state with a call to action
    Empty,
    Content(&'a T),
}

impl<'a, T: IsEmpty> From<&'a FetchState<T>> for ScreenView<'a, T> {
    fn from(state: &'a FetchState<T>) -> Self {
        match state {
            FetchState::Loading => ScreenView::Spinner,
            FetchState::Error(message) => ScreenView::Failed(message),
            FetchState::Ready(payload) if payload.is_empty_payload() => ScreenView::Empty,
            FetchState::Ready(payload) => ScreenView::Content(payload),
        }
    }
}

struct Inner<T> {
    state: FetchState<T>,
    generation: u64,
    token: CancellationToken,
}

/// Drives one screen's fetch lifecycle.
pub struct ScreenController<T> {
    name: &'static str,
    inner: Mutex<Inner<T>>,
    fetches: AtomicU64,
}

impl<T: Clone> ScreenController<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Mutex::new(Inner {
                state: FetchState::Loading,
                generation: 0,
                token: CancellationToken::new(),
            }),
            fetches: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> FetchState<T> {
        self.lock().state.clone()
    }

    /// Number of fetches issued over the controller's lifetime
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Mount the screen: enter Loading and issue exactly one fetch.
    ///
    /// Returns the settled state, or `None` if this mount was superseded or
    /// unmounted before the fetch completed (its result is discarded).
    pub async fn mount<F, Fut, E>(&self, fetch: F) -> Option<FetchState<T>>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let (generation, token) = {
            let mut inner = self.lock();
            inner.token.cancel();
            inner.generation += 1;
            inner.token = CancellationToken::new();
            inner.state = FetchState::Loading;
            (inner.generation, inner.token.clone())
        };
        self.fetches.fetch_add(1, Ordering::SeqCst);
        debug!("{}: mount #{} fetching", self.name, generation);

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = fetch(token.clone()) => Some(result),
        };

        let Some(result) = outcome else {
            debug!("{}: mount #{} cancelled", self.name, generation);
            return None;
        };

        let mut inner = self.lock();
        if inner.generation != generation || token.is_cancelled() {
            debug!("{}: discarding stale result of mount #{}", self.name, generation);
            return None;
        }
        inner.state = FetchState::from_result(result);
        if let FetchState::Error(ref message) = inner.state {
            warn!("{}: fetch failed: {}", self.name, message);
        }
        Some(inner.state.clone())
    }

    /// Tear the screen down; an in-flight fetch is cancelled and its result dropped.
    pub fn unmount(&self) {
        let inner = self.lock();
        inner.token.cancel();
        debug!("{}: unmounted", self.name);
    }
}
