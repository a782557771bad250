//! Session gate: picks the authenticated or unauthenticated stack from the
//! session notifications it observes.
//!
//! `GateState` is the pure state machine; `SessionGate` attaches it to a
//! [`SessionProvider`] and publishes each transition on a `watch` channel.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::auth::{Session, SessionProvider, SessionStatus, Subscription};

/// Which stack the root should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateMode {
    /// No notification yet: neutral placeholder, no stack
    Pending,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GateState {
    /// Set by the first notification and never cleared
    pub ready: bool,
    pub status: SessionStatus,
    pub session: Option<Session>,
    /// Notifications seen so far
    pub observations: u64,
}

impl GateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one notification from the session source.
    pub fn observe(&mut self, session: Option<&Session>) {
        self.ready = true;
        self.observations += 1;
        self.status = if session.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        };
        self.session = session.cloned();
    }

    pub fn mode(&self) -> GateMode {
        match (self.ready, self.status) {
            (false, _) | (true, SessionStatus::Unknown) => GateMode::Pending,
            (true, SessionStatus::Authenticated) => GateMode::Authenticated,
            (true, SessionStatus::Unauthenticated) => GateMode::Unauthenticated,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.uid.as_str())
    }
}

/// A gate attached to a session source. Dropping it unsubscribes.
pub struct SessionGate {
    state: Arc<watch::Sender<GateState>>,
    subscription: Option<Subscription>,
}

impl SessionGate {
    /// Subscribe to `provider`. If the provider has already resolved, the gate is
    /// ready on return.
    pub fn attach(provider: &dyn SessionProvider) -> Self {
        let (tx, _rx) = watch::channel(GateState::new());
        let state = Arc::new(tx);

        let sink = state.clone();
        let subscription = provider.subscribe(Box::new(move |session: Option<&Session>| {
            sink.send_modify(|gate| {
                let before = gate.mode();
                gate.observe(session);
                let after = gate.mode();
                if before != after {
                    info!("Session gate: {:?} -> {:?}", before, after);
                } else {
                    debug!("Session gate notified ({:?})", after);
                }
            });
        }));

        Self {
            state,
            subscription: Some(subscription),
        }
    }

    pub fn state(&self) -> GateState {
        self.state.borrow().clone()
    }

    pub fn mode(&self) -> GateMode {
        self.state.borrow().mode()
    }

    /// Receiver that wakes on every notification
    pub fn watch(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    /// Release the subscription. Later notifications no longer reach this gate.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            debug!("Session gate detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        self.detach();
    }
}
