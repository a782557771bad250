//! App-level session context.
//!
//! Attaches one `SessionGate` to the injected session source and mirrors its
//! state into a signal, so every component sees the same gate mode.

use dioxus::prelude::*;
use tracing::warn;

use crate::auth::Session;
use crate::gate::{GateMode, GateState, SessionGate};
use crate::services::Services;

/// Services injected at launch
pub fn use_services() -> Services {
    use_context::<Services>()
}

/// Global session state shared via context
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: Signal<GateState>,
}

impl SessionContext {
    /// Gate mode (subscribes the caller to changes)
    pub fn mode(&self) -> GateMode {
        self.state.read().mode()
    }

    /// Current session (subscribes the caller to changes)
    pub fn session(&self) -> Option<Session> {
        self.state.read().session.clone()
    }

    /// Current session without subscribing
    pub fn snapshot(&self) -> Option<Session> {
        self.state.peek().session.clone()
    }
}

/// Initialize session context provider - call once at app root
pub fn use_session_provider() {
    let services = use_services();
    let mut state = use_signal(GateState::new);

    use_context_provider(|| SessionContext { state });

    // Bridge gate transitions into the signal; the task owns the gate, so
    // dropping the root scope unsubscribes
    use_hook(|| {
        let gate = SessionGate::attach(&services.sessions);
        let mut rx = gate.watch();
        state.set(gate.state());
        spawn(async move {
            let _gate = gate;
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                state.set(next);
            }
        });
    });

    // Resolve the initial session once
    use_hook(|| {
        let services = services.clone();
        spawn(async move {
            if let Err(e) = services.auth.restore().await {
                warn!("Session restore failed: {}", e);
                services.sessions.publish(None);
            }
        });
    });
}

/// Get session context - use in any component
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}
