//! Dietary plan page: day selector, meals and daily totals.

use dioxus::prelude::*;

use crate::app::components::{Card, EmptyState, ErrorView, Layout, LoadingView};
use crate::app::gate::RouterNavigator;
use crate::app::screen::use_screen;
use crate::app::session_context::use_services;
use crate::nav::{Navigator as _, Screen};
use crate::screens::diet::{DailyPlan, DietPlan, MealItem};
use crate::view_state::ScreenView;

#[component]
pub fn DietaryPlan() -> Element {
    let services = use_services();
    let data = use_screen("dietary_plan", services.diet_plan.clone());
    let mut day_index = use_signal(|| 0usize);
    let nav = RouterNavigator::current();

    let state = data.get();
    let content = match ScreenView::from(&state) {
        ScreenView::Spinner => rsx! {
            LoadingView { message: "Loading your dietary plan..." }
        },
        ScreenView::Failed(message) => rsx! {
            ErrorView {
                message: message.to_string(),
                hint: "Failed to load dietary plan.",
                screen: Screen::DietaryPlan,
            }
        },
        ScreenView::Empty => rsx! {
            EmptyState {
                icon: "🍽",
                title: "No dietary plan found.",
                hint: "Generate a new plan to get personalized meal suggestions!",
                action_label: "Generate Plan",
                on_action: move |_| nav.push(Screen::Workouts),
            }
        },
        ScreenView::Content(plan) => {
            let selected = day_index();
            rsx! {
                DaySelector {
                    plan: plan.clone(),
                    selected,
                    on_select: move |index| day_index.set(index),
                }
                if let Some(day) = plan.day(selected) {
                    DayView { day: day.clone() }
                }
            }
        }
    };

    rsx! {
        Layout { title: "Dietary Plan".to_string(), active: Screen::DietaryPlan,
            h1 { class: "page-header", "Dietary Plan" }
            p { class: "secondary-text", "Target: Build Muscle (Example)" }
            {content}
        }
    }
}

#[component]
fn DaySelector(plan: DietPlan, selected: usize, on_select: EventHandler<usize>) -> Element {
    rsx! {
        div { class: "day-selector",
            for (index, day) in plan.days().iter().enumerate() {
                button {
                    key: "{index}",
                    class: if index == selected { "day-button day-button-selected" } else { "day-button" },
                    onclick: move |_| on_select.call(index),
                    "{day.day}"
                }
            }
        }
    }
}

#[component]
fn DayView(day: DailyPlan) -> Element {
    let totals = day.totals();
    rsx! {
        h2 { class: "section-title", "{day.day}'s Meals" }
        for (label, item) in day.labelled_meals() {
            Meal { key: "{label}", label: label.clone(), item: item.clone() }
        }
        Card {
            p { class: "card-title", "Daily Totals" }
            p { class: "primary-text", "{totals.calories} kcal" }
            p { class: "small-text",
                "P: {totals.protein}g | C: {totals.carbs}g | F: {totals.fats}g"
            }
        }
    }
}

#[component]
fn Meal(label: String, item: MealItem) -> Element {
    rsx! {
        Card { class: "meal",
            p { class: "meal-type", "{label}" }
            if let Some(src) = item.image_url.as_deref() {
                img { class: "meal-image", src: "{src}", alt: "{item.name}" }
            } else {
                div { class: "meal-image-placeholder", "🍴" }
            }
            p { class: "meal-name", "{item.name}" }
            p { class: "small-text", "{item.description}" }
            p { class: "meal-macros", "{item.macros_line()}" }
        }
    }
}
