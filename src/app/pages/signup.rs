//! Sign-up form: creates the account and its profile document.

use dioxus::prelude::*;
use tracing::debug;

use crate::app::components::{Alert, AlertMessage, TextField};
use crate::app::gate::RouterNavigator;
use crate::app::session_context::use_services;
use crate::auth::{flow, SignUpRequest};
use crate::nav::{Navigator as _, Screen};

#[component]
pub fn Signup() -> Element {
    let services = use_services();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut alert = use_signal(|| None::<AlertMessage>);
    let nav = RouterNavigator::current();

    let submit = move |_: MouseEvent| {
        if submitting() {
            return;
        }
        let request = SignUpRequest {
            name: name(),
            email: email().trim().to_string(),
            password: password(),
        };
        if let Err(e) = request.validate() {
            alert.set(Some(AlertMessage::error("Sign Up Failed", e)));
            return;
        }
        submitting.set(true);
        let auth = services.auth.clone();
        let store = services.store.clone();
        spawn(async move {
            match flow::sign_up(auth.as_ref(), store.as_ref(), &nav, &request).await {
                Ok(session) => debug!("Signed up as {}", session.uid),
                Err(e) => {
                    alert.set(Some(AlertMessage::error("Sign Up Failed", e)));
                    submitting.set(false);
                }
            }
        });
    };

    rsx! {
        document::Title { "Sign Up - Fitz" }
        div { class: "auth-screen",
            h1 { class: "auth-title", "Create Account" }

            if let Some(message) = alert() {
                Alert { alert: message, on_dismiss: move |_| alert.set(None) }
            }

            TextField {
                label: "Full Name",
                placeholder: "Jane Doe",
                value: name(),
                disabled: submitting(),
                on_input: move |v| name.set(v),
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
                placeholder: "At least 6 characters",
                kind: "password",
                value: password(),
                disabled: submitting(),
                on_input: move |v| password.set(v),
            }

            button {
                class: "btn",
                disabled: submitting(),
                onclick: submit,
                if submitting() { "Creating Account..." } else { "Sign Up" }
            }

            p { class: "auth-switch",
                "Already have an account? "
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| nav.replace(Screen::Login),
                    "Log In"
                }
            }
        }
    }
}
