//! Layout component wrapping every signed-in page.

use dioxus::prelude::*;

use super::tab_bar::TabBar;
use crate::nav::Screen;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in the window title)
    pub title: String,
    /// Active tab
    pub active: Screen,
    /// Page content
    pub children: Element,
}

/// Main layout: page content above the tab bar.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("FITZ_VERSION");
    let git_sha = env!("FITZ_GIT_SHA");
    let full_title = format!("{} - Fitz", props.title);

    rsx! {
        document::Title { "{full_title}" }

        div { class: "app-shell",
            main { class: "app-main",
                {props.children}
            }
            footer { class: "app-footer",
                "Fitz v{version} ({git_sha})"
            }
            TabBar { active: props.active }
        }
    }
}
