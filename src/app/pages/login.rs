//! Log-in form.

use dioxus::prelude::*;
use tracing::debug;

use crate::app::components::{Alert, AlertMessage, TextField};
use crate::app::gate::RouterNavigator;
use crate::app::session_context::use_services;
use crate::auth::{flow, validate_credentials};
use crate::nav::{Navigator as _, Screen};

#[component]
pub fn Login() -> Element {
    let services = use_services();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut alert = use_signal(|| None::<AlertMessage>);
    let nav = RouterNavigator::current();

    let submit = move |_: MouseEvent| {
        if submitting() {
            return;
        }
        let (email, password) = (email(), password());
        if let Err(e) = validate_credentials(&email, &password) {
            alert.set(Some(AlertMessage::error("Login Failed", e)));
            return;
        }
        submitting.set(true);
        let auth = services.auth.clone();
        spawn(async move {
            match flow::log_in(auth.as_ref(), &nav, email.trim(), &password).await {
                Ok(session) => debug!("Logged in as {}", session.uid),
                Err(e) => {
                    alert.set(Some(AlertMessage::error("Login Failed", e)));
                    submitting.set(false);
                }
            }
        });
    };

    rsx! {
        document::Title { "Log In - Fitz" }
        div { class: "auth-screen",
            h1 { class: "auth-title", "Welcome Back" }

            if let Some(message) = alert() {
                Alert { alert: message, on_dismiss: move |_| alert.set(None) }
            }

            TextField {
                label: "Email",
                placeholder: "you@example.com",
                kind: "email",
                value: email(),
                disabled: submitting(),
                on_input: move |v| email.set(v),
            }
            TextField {
                label: "Password",
                placeholder: "Password",
                kind: "password",
                value: password(),
                disabled: submitting(),
                on_input: move |v| password.set(v),
            }

            button {
                class: "btn",
                disabled: submitting(),
                onclick: submit,
                if submitting() { "Logging In..." } else { "Log In" }
            }

            p { class: "auth-switch",
                "Don't have an account? "
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| nav.replace(Screen::Signup),
                    "Sign Up"
                }
            }
        }
    }
}
