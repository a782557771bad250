use dioxus::prelude::*;

use crate::app::components::LoadingView;

/// Unknown paths. The gate redirects before this renders; it only shows if
/// the redirect has not landed yet.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let _ = segments;
    rsx! {
        LoadingView { message: "" }
    }
}
