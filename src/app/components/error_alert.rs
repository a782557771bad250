//! Dismissable alert component.

use dioxus::prelude::*;

/// A titled message
#[derive(Clone, Debug, PartialEq)]
pub struct AlertMessage {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl AlertMessage {
    pub fn error(title: &str, message: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            is_error: true,
        }
    }

    pub fn info(title: &str, message: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            is_error: false,
        }
    }
}

/// A dismissable alert that displays a title and message with a close button.
#[component]
pub fn Alert(
    alert: AlertMessage,
    /// Called when the dismiss button is clicked
    on_dismiss: EventHandler<()>,
) -> Element {
    let class = if alert.is_error {
        "alert alert-error"
    } else {
        "alert"
    };
    rsx! {
        div { class: "{class}", role: "alert",
            div {
                div { class: "alert-title", "{alert.title}" }
                div { class: "small-text", "{alert.message}" }
            }
            button {
                class: "btn btn-ghost",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
