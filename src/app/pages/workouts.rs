//! Workouts page: current plan, body-part focus and history.

use dioxus::prelude::*;

use crate::app::components::{
    Alert, AlertMessage, Card, CardHeader, ErrorView, Layout, LoadingView,
};
use crate::app::screen::use_screen;
use crate::app::session_context::use_services;
use crate::nav::Screen;
use crate::screens::workouts::{BodyPart, WorkoutsOverview};
use crate::view_state::FetchState;

#[component]
pub fn Workouts() -> Element {
    let services = use_services();
    let data = use_screen("workouts", services.workouts.clone());
    let mut selected = use_signal(|| None::<BodyPart>);
    let mut alert = use_signal(|| None::<AlertMessage>);

    let content = match data.get() {
        FetchState::Loading => rsx! {
            LoadingView { message: "Loading workouts..." }
        },
        FetchState::Error(message) => rsx! {
            ErrorView {
                message,
                hint: "Failed to load workouts.",
                screen: Screen::Workouts,
            }
        },
        FetchState::Ready(overview) => rsx! {
            Overview { overview }
        },
    };

    rsx! {
        Layout { title: "Workouts".to_string(), active: Screen::Workouts,
            h1 { class: "page-header", "Workouts" }

            if let Some(message) = alert() {
                Alert { alert: message, on_dismiss: move |_| alert.set(None) }
            }

            {content}

            Card {
                CardHeader { icon: "🎯", title: "Target Body Part" }
                div { class: "body-parts",
                    for part in BodyPart::ALL {
                        button {
                            key: "{part}",
                            class: if selected() == Some(part) { "zone-button zone-button-selected" } else { "zone-button" },
                            onclick: move |_| {
                                selected.set(Some(part));
                                alert.set(Some(AlertMessage::info(
                                    &format!("Selected: {}", part),
                                    part.focus_message(),
                                )));
                            },
                            "{part}"
                        }
                    }
                }
                if let Some(part) = selected() {
                    p { class: "small-text", "Selected: {part}" }
                }
            }

            button {
                class: "btn",
                onclick: move |_| {
                    alert.set(Some(AlertMessage::info(
                        "Generate New Plan",
                        "A new plan will be built from your selected focus.",
                    )));
                },
                "Generate New Plan"
            }
        }
    }
}

#[component]
fn Overview(overview: WorkoutsOverview) -> Element {
    let plan = &overview.plan;
    rsx! {
        Card {
            CardHeader { icon: "🏋", title: "Current Plan" }
            p { class: "primary-text", "{plan.name}" }
            p { class: "secondary-text", "{plan.schedule_line()}" }
        }
        Card {
            CardHeader { icon: "🕑", title: "History" }
            for session in overview.history.iter() {
                div { key: "{session.date}", class: "history-item",
                    p { class: "primary-text", "{session.title}" }
                    p { class: "small-text", "{session.details_line()}" }
                }
            }
        }
    }
}
