//! Dioxus application entry point.
//!
//! The root provides the services and session contexts; every route renders
//! inside the `Gate` layout, which picks the stack from the session state.

use dioxus::prelude::*;

pub mod components;
pub mod gate;
pub mod pages;
pub mod screen;
pub mod session_context;
pub mod theme;

use gate::Gate;
use pages::{DietaryPlan, Home, Login, NotFound, Playlists, Profile, Signup, Workouts};
use session_context::use_session_provider;
use theme::ThemeStyles;

use crate::nav::Screen;

/// Root app component with routing
#[component]
pub fn App() -> Element {
    // Session gate at the app root (single subscription for all pages)
    use_session_provider();

    rsx! {
        ThemeStyles {}
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Gate)]
        #[route("/")]
        Home {},
        #[route("/workouts")]
        Workouts {},
        #[route("/dietary-plan")]
        DietaryPlan {},
        #[route("/playlists")]
        Playlists {},
        #[route("/profile")]
        Profile {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl Route {
    /// Screen this route shows (None for unknown paths)
    pub fn screen(&self) -> Option<Screen> {
        match self {
            Route::Home {} => Some(Screen::Home),
            Route::Workouts {} => Some(Screen::Workouts),
            Route::DietaryPlan {} => Some(Screen::DietaryPlan),
            Route::Playlists {} => Some(Screen::Playlists),
            Route::Profile {} => Some(Screen::Profile),
            Route::Login {} => Some(Screen::Login),
            Route::Signup {} => Some(Screen::Signup),
            Route::NotFound { .. } => None,
        }
    }
}

impl From<Screen> for Route {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Home => Route::Home {},
            Screen::Workouts => Route::Workouts {},
            Screen::DietaryPlan => Route::DietaryPlan {},
            Screen::Playlists => Route::Playlists {},
            Screen::Profile => Route::Profile {},
            Screen::Login => Route::Login {},
            Screen::Signup => Route::Signup {},
        }
    }
}
