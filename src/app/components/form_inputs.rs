//! Reusable form input components.

use dioxus::prelude::*;

/// A labeled text input.
#[component]
pub fn TextField(
    /// Input label
    label: &'static str,
    /// Placeholder shown while empty
    #[props(default)]
    placeholder: &'static str,
    /// HTML input type (`text`, `email`, `password`)
    #[props(default = "text")]
    kind: &'static str,
    /// Current value
    value: String,
    #[props(default)]
    disabled: bool,
    /// Called on every keystroke
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            input {
                r#type: kind,
                placeholder: placeholder,
                value: "{value}",
                disabled: disabled,
                autocomplete: "off",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}
