//! Dark palette and stylesheet injection.
//!
//! Colours are exposed as CSS custom properties on `:root`; `public/fitz.css`
//! only refers to the variables.

use dioxus::prelude::*;

/// Named colours of the dark theme
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: &'static str,
    pub card: &'static str,
    pub primary_text: &'static str,
    pub secondary_text: &'static str,
    pub accent: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub border: &'static str,
}

pub const DARK: Palette = Palette {
    background: "#0D0D0D",
    card: "#1C1C1E",
    primary_text: "#FFFFFF",
    secondary_text: "#AAAAAA",
    accent: "#0A84FF",
    green: "#34C759",
    red: "#FF453A",
    border: "#3A3A3C",
};

/// Card corner radius and padding, in px
pub const CARD_RADIUS: u32 = 12;
pub const CARD_PADDING: u32 = 16;

const STYLESHEET: &str = include_str!("../../public/fitz.css");

impl Palette {
    /// `:root { --background: ...; }` block
    pub fn css_variables(&self) -> String {
        let vars = [
            ("background", self.background),
            ("card", self.card),
            ("primary-text", self.primary_text),
            ("secondary-text", self.secondary_text),
            ("accent", self.accent),
            ("green", self.green),
            ("red", self.red),
            ("border", self.border),
        ];
        let mut css = String::from(":root {\n");
        for (name, value) in vars {
            css.push_str(&format!("  --{}: {};\n", name, value));
        }
        css.push_str(&format!("  --card-radius: {}px;\n", CARD_RADIUS));
        css.push_str(&format!("  --card-padding: {}px;\n", CARD_PADDING));
        css.push('}');
        css
    }
}

/// Injects the palette and stylesheet into the document head.
#[component]
pub fn ThemeStyles() -> Element {
    let variables = DARK.css_variables();
    rsx! {
        document::Style { "{variables}" }
        document::Style { "{STYLESHEET}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_variables() {
        let css = DARK.css_variables();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--background: #0D0D0D;"));
        assert!(css.contains("--accent: #0A84FF;"));
        assert!(css.contains("--card-radius: 12px;"));
    }

    #[test]
    fn test_stylesheet_uses_variables() {
        assert!(STYLESHEET.contains("var(--card)"));
        assert!(!STYLESHEET.contains("#1C1C1E"));
    }
}
