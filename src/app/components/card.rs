//! Rounded content card.

use dioxus::prelude::*;

#[component]
pub fn Card(
    /// Extra classes appended to `card`
    #[props(default)]
    class: &'static str,
    children: Element,
) -> Element {
    rsx! {
        div { class: "card {class}", {children} }
    }
}

/// Card header row: icon glyph and title
#[component]
pub fn CardHeader(icon: &'static str, title: &'static str) -> Element {
    rsx! {
        div { class: "card-header",
            span { "{icon}" }
            span { class: "card-title", "{title}" }
        }
    }
}
