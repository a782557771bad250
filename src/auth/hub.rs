//! In-process session notification source.
//!
//! Auth backends publish into a `SessionHub`; the gate and screens subscribe to it.
//! Tests use a bare hub as a fake auth service.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use async_trait::async_trait;
use tracing::debug;

use super::{AuthError, Session, SessionCallback, SessionProvider, Subscription, TokenSource};

type Listener = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

/// One pending notification: the snapshot and the listeners it is owed to
struct Delivery {
    targets: Vec<u64>,
    session: Option<Session>,
}

#[derive(Default)]
struct HubState {
    /// Set by the first `publish`; listeners registered before it wait
    resolved: bool,
    session: Option<Session>,
    listeners: BTreeMap<u64, Listener>,
    next_id: u64,
    /// Deliveries not yet handed to their listeners, oldest first
    queue: VecDeque<Delivery>,
    /// A caller is draining `queue`; others only enqueue
    draining: bool,
}

impl HubState {
    /// Queue a delivery. Returns true when the caller must drain.
    fn enqueue(&mut self, delivery: Delivery) -> bool {
        self.queue.push_back(delivery);
        !std::mem::replace(&mut self.draining, true)
    }
}

#[derive(Default)]
struct HubInner {
    state: Mutex<HubState>,
}

impl HubInner {
    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Hand queued deliveries to listeners in publish order, outside the lock.
    ///
    /// Publishes made while draining (from a listener or another thread) are
    /// appended and delivered by this loop, so no listener ever sees an older
    /// snapshot after a newer one.
    fn drain(&self) {
        loop {
            let (listeners, session) = {
                let mut state = self.lock();
                let Some(delivery) = state.queue.pop_front() else {
                    state.draining = false;
                    return;
                };
                let listeners: Vec<Listener> = delivery
                    .targets
                    .iter()
                    .filter_map(|id| state.listeners.get(id).cloned())
                    .collect();
                (listeners, delivery.session)
            };
            for listener in listeners {
                listener(session.as_ref());
            }
        }
    }
}

/// Callback registry holding the current session.
#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Arc<HubInner>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a session change and notify every listener.
    ///
    /// Listeners are invoked outside the lock so they may subscribe, read back
    /// or publish again. A publish made during delivery is queued behind the
    /// one in flight and delivered after it.
    pub fn publish(&self, session: Option<Session>) {
        let must_drain = {
            let mut state = self.inner.lock();
            state.resolved = true;
            state.session = session;
            debug!(
                "Session changed (signed_in: {}, listeners: {})",
                state.session.is_some(),
                state.listeners.len()
            );
            let delivery = Delivery {
                targets: state.listeners.keys().copied().collect(),
                session: state.session.clone(),
            };
            state.enqueue(delivery)
        };
        if must_drain {
            self.inner.drain();
        }
    }

    /// Whether the initial state has been published
    pub fn is_resolved(&self) -> bool {
        self.inner.lock().resolved
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl SessionProvider for SessionHub {
    fn subscribe(&self, callback: SessionCallback) -> Subscription {
        let listener: Listener = Arc::from(callback);
        let (id, must_drain) = {
            let mut state = self.inner.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.insert(id, listener);
            let must_drain = state.resolved && {
                let delivery = Delivery {
                    targets: vec![id],
                    session: state.session.clone(),
                };
                state.enqueue(delivery)
            };
            (id, must_drain)
        };

        // Delivered now unless another delivery is in flight, in which case
        // the draining caller hands it over after the snapshots queued before it.
        if must_drain {
            self.inner.drain();
        }

        let weak: Weak<HubInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.lock().listeners.remove(&id);
            }
        })
    }

    fn current(&self) -> Option<Session> {
        self.inner.lock().session.clone()
    }
}

/// The published token as-is; a bare hub cannot refresh.
#[async_trait]
impl TokenSource for SessionHub {
    async fn id_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.current().map(|s| s.id_token))
    }
}
