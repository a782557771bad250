//! Bottom tab bar for the signed-in stack.

use dioxus::prelude::*;

use crate::app::Route;
use crate::nav::Screen;

fn icon(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "⌂",
        Screen::Workouts => "🏋",
        Screen::DietaryPlan => "🍽",
        Screen::Playlists => "♫",
        Screen::Profile => "👤",
        Screen::Login | Screen::Signup => "",
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab tab-active"
    } else {
        "tab"
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct TabBarProps {
    /// The currently active tab
    pub active: Screen,
}

/// Tab bar listing every screen of the tab stack.
#[component]
pub fn TabBar(props: TabBarProps) -> Element {
    rsx! {
        nav { class: "tab-bar",
            for screen in Screen::TABS {
                Link {
                    key: "{screen.path()}",
                    to: Route::from(screen),
                    class: tab_class(screen == props.active).to_string(),
                    span { class: "tab-icon", "{icon(screen)}" }
                    span { "{screen.title()}" }
                }
            }
        }
    }
}
