//! Hook binding a `ScreenController` to a component's lifetime.

use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;

use super::session_context::{use_session, SessionContext};
use crate::screens::DataSource;
use crate::view_state::{FetchState, ScreenController};

/// A screen's fetch state plus the means to re-run its fetch.
pub struct ScreenData<T: 'static> {
    pub state: Signal<FetchState<T>>,
    controller: Rc<ScreenController<T>>,
    source: Arc<dyn DataSource<T>>,
    session: SessionContext,
}

impl<T: 'static> Clone for ScreenData<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            controller: self.controller.clone(),
            source: self.source.clone(),
            session: self.session,
        }
    }
}

impl<T: Clone + 'static> ScreenData<T> {
    /// Snapshot of the current state
    pub fn get(&self) -> FetchState<T> {
        self.state.read().clone()
    }

    /// Mount again: back to Loading with exactly one new fetch. A fetch still
    /// in flight from an earlier mount is cancelled.
    pub fn reload(&self) {
        let mut state = self.state;
        let controller = self.controller.clone();
        let source = self.source.clone();
        let session = self.session.snapshot();
        state.set(FetchState::Loading);
        spawn(async move {
            let settled = controller
                .mount(move |_| async move { source.load(session.as_ref()).await })
                .await;
            if let Some(settled) = settled {
                state.set(settled);
            }
        });
    }
}

/// Fetch from `source` when the component mounts; cancel when it unmounts.
pub fn use_screen<T: Clone + 'static>(
    name: &'static str,
    source: Arc<dyn DataSource<T>>,
) -> ScreenData<T> {
    let session = use_session();
    let state = use_signal(|| FetchState::Loading);
    let controller = use_hook(|| Rc::new(ScreenController::new(name)));

    let data = ScreenData {
        state,
        controller: controller.clone(),
        source,
        session,
    };

    use_hook({
        let data = data.clone();
        move || data.reload()
    });
    use_drop(move || controller.unmount());

    data
}
