//! Screen graph and auth-aware navigation decisions.
//!
//! The renderer owns the actual router; this module decides *where* a user may be
//! given the gate mode, and records the navigation a flow requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gate::GateMode;

/// Every screen in the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Login,
    Signup,
    Home,
    Workouts,
    DietaryPlan,
    Playlists,
    Profile,
}

/// Which navigation stack a screen belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stack {
    /// Login/signup, for signed-out users
    Unauthenticated,
    /// Bottom tab bar, for signed-in users
    Tabs,
}

impl Screen {
    pub const TABS: [Screen; 5] = [
        Screen::Home,
        Screen::Workouts,
        Screen::DietaryPlan,
        Screen::Playlists,
        Screen::Profile,
    ];

    pub fn stack(self) -> Stack {
        match self {
            Screen::Login | Screen::Signup => Stack::Unauthenticated,
            _ => Stack::Tabs,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Screen::Login => "/login",
            Screen::Signup => "/signup",
            Screen::Home => "/",
            Screen::Workouts => "/workouts",
            Screen::DietaryPlan => "/dietary-plan",
            Screen::Playlists => "/playlists",
            Screen::Profile => "/profile",
        }
    }

    pub fn from_path(path: &str) -> Option<Screen> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        [Screen::Login, Screen::Signup]
            .into_iter()
            .chain(Screen::TABS)
            .find(|s| s.path() == normalized)
    }

    /// Tab bar label
    pub fn title(self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Signup => "Sign Up",
            Screen::Home => "Home",
            Screen::Workouts => "Workouts",
            Screen::DietaryPlan => "Meals",
            Screen::Playlists => "Music",
            Screen::Profile => "Profile",
        }
    }

    /// Landing screen of a stack
    pub fn landing(stack: Stack) -> Screen {
        match stack {
            Stack::Unauthenticated => Screen::Login,
            Stack::Tabs => Screen::Home,
        }
    }

    /// Action shown under this screen's failure message. Never a retry: the
    /// screen only fetches again when it is mounted again.
    pub fn error_fallback(self) -> Option<Fallback> {
        let (label, target) = match self {
            Screen::Login | Screen::Signup => return None,
            Screen::Home => ("Open Workouts", Screen::Workouts),
            Screen::Workouts | Screen::Profile => ("Back to Home", Screen::Home),
            Screen::DietaryPlan | Screen::Playlists => ("Generate Plan", Screen::Workouts),
        };
        Some(Fallback { label, target })
    }
}

/// Navigation offered beside an error message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fallback {
    pub label: &'static str,
    pub target: Screen,
}

impl Fallback {
    pub fn follow(self, nav: &dyn Navigator) {
        nav.push(self.target);
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What the navigation container should do for a requested screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Auth state not known yet: show the loading indicator, no stack
    Wait,
    Render,
    /// Requested screen belongs to the other stack
    Redirect(Screen),
}

/// Decide what to show for `requested` under the current gate mode.
pub fn resolve(mode: GateMode, requested: Screen) -> Resolution {
    let allowed = match mode {
        GateMode::Pending => return Resolution::Wait,
        GateMode::Authenticated => Stack::Tabs,
        GateMode::Unauthenticated => Stack::Unauthenticated,
    };
    if requested.stack() == allowed {
        Resolution::Render
    } else {
        Resolution::Redirect(Screen::landing(allowed))
    }
}

/// Navigation requested by flows. `replace` discards the current entry.
pub trait Navigator {
    fn push(&self, screen: Screen);
    fn replace(&self, screen: Screen);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Push(Screen),
    Replace(Screen),
}

/// Navigator that records requests; for tests and headless flows.
#[derive(Default)]
pub struct RecordingNavigator {
    actions: std::sync::Mutex<Vec<NavAction>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<NavAction> {
        self.actions
            .lock()
            .map(|a| a.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    pub fn last(&self) -> Option<NavAction> {
        self.actions().last().copied()
    }

    fn record(&self, action: NavAction) {
        match self.actions.lock() {
            Ok(mut actions) => actions.push(action),
            Err(e) => e.into_inner().push(action),
        }
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, screen: Screen) {
        self.record(NavAction::Push(screen));
    }

    fn replace(&self, screen: Screen) {
        self.record(NavAction::Replace(screen));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_waits_everywhere() {
        for screen in [Screen::Login, Screen::Home, Screen::Profile] {
            assert_eq!(resolve(GateMode::Pending, screen), Resolution::Wait);
        }
    }

    #[test]
    fn test_signed_in_user_is_kept_out_of_login() {
        assert_eq!(
            resolve(GateMode::Authenticated, Screen::Login),
            Resolution::Redirect(Screen::Home)
        );
        assert_eq!(
            resolve(GateMode::Authenticated, Screen::Playlists),
            Resolution::Render
        );
    }

    #[test]
    fn test_signed_out_user_is_sent_to_login() {
        assert_eq!(
            resolve(GateMode::Unauthenticated, Screen::Profile),
            Resolution::Redirect(Screen::Login)
        );
        assert_eq!(
            resolve(GateMode::Unauthenticated, Screen::Signup),
            Resolution::Render
        );
    }

    #[test]
    fn test_paths_round_trip() {
        for screen in Screen::TABS.into_iter().chain([Screen::Login, Screen::Signup]) {
            assert_eq!(Screen::from_path(screen.path()), Some(screen));
        }
        assert_eq!(Screen::from_path("/profile/"), Some(Screen::Profile));
        assert_eq!(Screen::from_path("/playlists?x=1"), Some(Screen::Playlists));
        assert_eq!(Screen::from_path("/nowhere"), None);
    }

    #[test]
    fn test_every_tab_offers_a_way_out_of_an_error() {
        for screen in Screen::TABS {
            let fallback = screen.error_fallback().unwrap();
            assert_ne!(fallback.target, screen);
            assert_eq!(fallback.target.stack(), Stack::Tabs);
            assert!(!fallback.label.is_empty());
        }
        assert_eq!(Screen::Login.error_fallback(), None);

        let nav = RecordingNavigator::new();
        Screen::DietaryPlan.error_fallback().unwrap().follow(&nav);
        assert_eq!(nav.actions(), vec![NavAction::Push(Screen::Workouts)]);
    }

    #[test]
    fn test_recording_navigator() {
        let nav = RecordingNavigator::new();
        nav.push(Screen::Workouts);
        nav.replace(Screen::Login);
        assert_eq!(
            nav.actions(),
            vec![NavAction::Push(Screen::Workouts), NavAction::Replace(Screen::Login)]
        );
        assert_eq!(nav.last(), Some(NavAction::Replace(Screen::Login)));
    }
}
