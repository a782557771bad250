//! Profile page: avatar, identity, settings rows and log out.

use dioxus::prelude::*;
use tracing::warn;

use crate::app::components::{Alert, AlertMessage, Card, ErrorView, Layout, LoadingView};
use crate::app::gate::RouterNavigator;
use crate::app::screen::use_screen;
use crate::app::session_context::use_services;
use crate::auth::flow;
use crate::nav::Screen;
use crate::screens::profile::UserProfile;
use crate::view_state::FetchState;

const SETTINGS: [(&str, &str); 3] = [
    ("⚙", "Account Settings"),
    ("🎯", "Fitness Goals"),
    ("🎨", "App Theme"),
];

#[component]
pub fn Profile() -> Element {
    let services = use_services();
    let data = use_screen("profile", services.profile.clone());
    let mut alert = use_signal(|| None::<AlertMessage>);
    let mut signing_out = use_signal(|| false);
    let nav = RouterNavigator::current();

    let log_out = move |_: MouseEvent| {
        if signing_out() {
            return;
        }
        signing_out.set(true);
        let auth = services.auth.clone();
        spawn(async move {
            if let Err(e) = flow::log_out(auth.as_ref(), &nav).await {
                warn!("Log out failed: {}", e);
                alert.set(Some(AlertMessage::error("Logout Failed", e)));
                signing_out.set(false);
            }
        });
    };

    let content = match data.get() {
        FetchState::Loading => rsx! {
            LoadingView { message: "Loading profile..." }
        },
        FetchState::Error(message) => rsx! {
            ErrorView {
                message,
                hint: "Failed to load profile.",
                screen: Screen::Profile,
            }
        },
        FetchState::Ready(profile) => rsx! {
            ProfileCard { profile }
        },
    };

    rsx! {
        Layout { title: "Profile".to_string(), active: Screen::Profile,
            h1 { class: "page-header", "Profile" }

            if let Some(message) = alert() {
                Alert { alert: message, on_dismiss: move |_| alert.set(None) }
            }

            {content}

            Card {
                for (icon, label) in SETTINGS {
                    div { key: "{label}", class: "setting-item",
                        span { "{icon}" }
                        span { class: "primary-text", "{label}" }
                        span { class: "secondary-text", "›" }
                    }
                }
            }

            button {
                class: "btn btn-danger",
                disabled: signing_out(),
                onclick: log_out,
                "Log Out"
            }
        }
    }
}

#[component]
fn ProfileCard(profile: UserProfile) -> Element {
    rsx! {
        Card { class: "profile-card",
            img {
                class: "profile-image",
                src: "{profile.image_url}",
                alt: "{profile.display_name()}",
            }
            p { class: "user-name", "{profile.display_name()}" }
            p { class: "secondary-text", "{profile.display_email()}" }
        }
    }
}
