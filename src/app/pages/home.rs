//! Home dashboard: greeting, sleep, activity and weight cards.

use dioxus::prelude::*;

use crate::app::components::{Card, CardHeader, ErrorView, Layout, LoadingView};
use crate::app::screen::use_screen;
use crate::app::session_context::{use_services, use_session};
use crate::nav::Screen;
use crate::screens::home::HomeSummary;
use crate::screens::profile::GUEST_NAME;
use crate::view_state::FetchState;

#[component]
pub fn Home() -> Element {
    let services = use_services();
    let session = use_session();
    let data = use_screen("home", services.home.clone());

    let name = session
        .session()
        .and_then(|s| s.greeting_name().map(str::to_string))
        .unwrap_or_else(|| GUEST_NAME.to_string());

    let content = match data.get() {
        FetchState::Loading => rsx! {
            LoadingView { message: "Loading your day..." }
        },
        FetchState::Error(message) => rsx! {
            ErrorView {
                message,
                hint: "Failed to load today's summary.",
                screen: Screen::Home,
            }
        },
        FetchState::Ready(summary) => rsx! {
            Summary { summary }
        },
    };

    rsx! {
        Layout { title: "Home".to_string(), active: Screen::Home,
            div { class: "greeting",
                p { class: "secondary-text", "Thanks for Clocking It..." }
                div { class: "user-name",
                    div { class: "greeting-avatar" }
                    span { "{name}" }
                }
            }
            h1 { class: "page-header", "Today" }
            {content}
        }
    }
}

#[component]
fn Summary(summary: HomeSummary) -> Element {
    let sleep = &summary.sleep;
    let activity = &summary.activity;
    let weight = &summary.weight;
    let percent = weight.percent();

    rsx! {
        Card {
            CardHeader { icon: "☾", title: "Sleep Score" }
            div { class: "big-number", "{sleep.score}" }
            p { class: "secondary-text", "Sleep hours" }
            div { class: "line-break" }
            p { class: "primary-text", "{sleep.headline}" }
            p { class: "small-text", "{sleep.advice}" }
        }
        Card {
            CardHeader { icon: "🚶", title: "Activity Summary" }
            div { class: "stat-row",
                div {
                    div { class: "stat-number", "{activity.distance_label()}" }
                    span { class: "small-text", "km" }
                }
                div {
                    div { class: "stat-number", "{activity.active_minutes}" }
                    span { class: "small-text", "min" }
                }
                div {
                    div { class: "stat-number", "{activity.calories}" }
                    span { class: "small-text", "kcal" }
                }
            }
        }
        Card {
            CardHeader { icon: "⚖", title: "Weight Progress" }
            div { class: "big-number", "{weight.current_lbs}" }
            p { class: "secondary-text", "lbs" }
            div { class: "line-break" }
            p { class: "small-text", "{weight.target_line()}" }
            div { class: "progress",
                div { class: "progress-fill", style: "width: {percent}%" }
            }
        }
    }
}
