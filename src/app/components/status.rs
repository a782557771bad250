//! Loading, error and empty views shared by the data-driven screens.

use dioxus::prelude::*;

use super::Card;
use crate::app::gate::RouterNavigator;
use crate::nav::Screen;

/// Spinner with an optional caption
#[component]
pub fn LoadingView(message: &'static str) -> Element {
    rsx! {
        div { class: "status-view", aria_busy: "true",
            div { class: "spinner" }
            if !message.is_empty() {
                p { class: "secondary-text", "{message}" }
            }
        }
    }
}

/// The failure message, verbatim, with a static hint and the screen's
/// fallback navigation underneath
#[component]
pub fn ErrorView(message: String, hint: &'static str, screen: Screen) -> Element {
    let nav = RouterNavigator::current();
    let fallback = screen.error_fallback();

    rsx! {
        div { class: "status-view",
            span { class: "status-icon", "⚠" }
            p { class: "error-text", "{message}" }
            p { class: "small-text", "{hint}" }
            if let Some(fallback) = fallback {
                button {
                    class: "btn",
                    onclick: move |_| fallback.follow(&nav),
                    {fallback.label}
                }
            }
        }
    }
}

/// Ready with nothing to show: a call to action, not an error
#[component]
pub fn EmptyState(
    icon: &'static str,
    title: &'static str,
    hint: &'static str,
    action_label: &'static str,
    on_action: EventHandler<()>,
) -> Element {
    rsx! {
        Card { class: "empty-card",
            span { class: "status-icon", "{icon}" }
            p { class: "primary-text", "{title}" }
            p { class: "small-text", "{hint}" }
            button { class: "btn", onclick: move |_| on_action.call(()), "{action_label}" }
        }
    }
}
