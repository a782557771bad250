//! Workouts screen: current plan, body-part focus and history.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Shoulders,
    Chest,
    Arms,
    Core,
    Legs,
    Back,
}

impl BodyPart {
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Shoulders,
        BodyPart::Chest,
        BodyPart::Arms,
        BodyPart::Core,
        BodyPart::Legs,
        BodyPart::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BodyPart::Shoulders => "Shoulders",
            BodyPart::Chest => "Chest",
            BodyPart::Arms => "Arms",
            BodyPart::Core => "Core",
            BodyPart::Legs => "Legs",
            BodyPart::Back => "Back",
        }
    }

    /// Confirmation shown after picking a body part
    pub fn focus_message(self) -> String {
        format!(
            "You've selected to focus on {}. We can now filter exercises or suggest a plan.",
            self.label()
        )
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub name: String,
    pub days_per_week: u32,
    pub intensity: String,
    pub completed: u32,
    pub remaining: u32,
    pub weeks_left: u32,
}

impl WorkoutPlan {
    /// `"3 days/week | Moderate Intensity"`
    pub fn schedule_line(&self) -> String {
        format!(
            "{} days/week | {} Intensity",
            self.days_per_week, self.intensity
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Display date, e.g. "Mon, Oct 23"
    pub date: String,
    pub title: String,
    pub minutes: u32,
}

impl WorkoutSession {
    pub fn details_line(&self) -> String {
        format!("{} - {} min", self.title, self.minutes)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutsOverview {
    pub plan: WorkoutPlan,
    pub history: Vec<WorkoutSession>,
}
