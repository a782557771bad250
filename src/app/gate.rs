//! Root layout that enforces the session gate on every route.

use dioxus::prelude::*;
use dioxus::router::Navigator;
use tracing::debug;

use super::components::LoadingView;
use super::session_context::use_session;
use super::Route;
use crate::gate::GateMode;
use crate::nav::{self, Resolution, Screen, Stack};

/// Resolution for a route that may not name a known screen.
pub fn resolve_route(mode: GateMode, screen: Option<Screen>) -> Resolution {
    match (mode, screen) {
        (GateMode::Pending, _) => Resolution::Wait,
        (_, Some(screen)) => nav::resolve(mode, screen),
        (GateMode::Authenticated, None) => Resolution::Redirect(Screen::landing(Stack::Tabs)),
        (GateMode::Unauthenticated, None) => {
            Resolution::Redirect(Screen::landing(Stack::Unauthenticated))
        }
    }
}

/// Shows nothing but a spinner until the first session notification, then
/// only the stack that matches the session.
#[component]
pub fn Gate() -> Element {
    let session = use_session();
    let route = use_route::<Route>();

    match resolve_route(session.mode(), route.screen()) {
        Resolution::Wait => rsx! {
            LoadingView { message: "" }
        },
        Resolution::Redirect(screen) => {
            debug!("Redirecting {} -> {}", route, screen.path());
            rsx! {
                Redirect { to: Route::from(screen) }
            }
        }
        Resolution::Render => rsx! {
            Outlet::<Route> {}
        },
    }
}

/// Replaces the current entry with `to` once mounted.
#[component]
fn Redirect(to: Route) -> Element {
    let navigator = navigator();
    use_effect(move || {
        navigator.replace(to.clone());
    });
    rsx! {
        LoadingView { message: "" }
    }
}

/// Router-backed implementation of the flow navigator
#[derive(Clone, Copy)]
pub struct RouterNavigator(pub Navigator);

impl RouterNavigator {
    pub fn current() -> Self {
        Self(navigator())
    }
}

impl nav::Navigator for RouterNavigator {
    fn push(&self, screen: Screen) {
        self.0.push(Route::from(screen));
    }

    fn replace(&self, screen: Screen) {
        self.0.replace(Route::from(screen));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_route_goes_to_landing() {
        assert_eq!(
            resolve_route(GateMode::Authenticated, None),
            Resolution::Redirect(Screen::Home)
        );
        assert_eq!(
            resolve_route(GateMode::Unauthenticated, None),
            Resolution::Redirect(Screen::Login)
        );
        assert_eq!(resolve_route(GateMode::Pending, None), Resolution::Wait);
    }

    #[test]
    fn test_known_route_defers_to_stack_rules() {
        assert_eq!(
            resolve_route(GateMode::Authenticated, Some(Screen::Signup)),
            Resolution::Redirect(Screen::Home)
        );
        assert_eq!(
            resolve_route(GateMode::Unauthenticated, Some(Screen::Login)),
            Resolution::Render
        );
    }
}
