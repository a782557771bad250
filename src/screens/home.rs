//! Home dashboard summary.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SleepSummary {
    pub score: u32,
    pub headline: String,
    pub advice: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub distance_km: f64,
    pub active_minutes: u32,
    pub calories: u32,
}

impl ActivitySummary {
    /// Distance with two decimals, as on the dashboard
    pub fn distance_label(&self) -> String {
        format!("{:.2}", self.distance_km)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightProgress {
    pub start_lbs: f64,
    pub current_lbs: f64,
    pub target_lbs: f64,
    pub weeks_left: u32,
}

impl WeightProgress {
    /// Share of the way from start to target, in 0..=100
    pub fn percent(&self) -> u8 {
        let total = self.start_lbs - self.target_lbs;
        if total.abs() < f64::EPSILON {
            return 100;
        }
        let done = (self.start_lbs - self.current_lbs) / total;
        (done.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn target_line(&self) -> String {
        format!(
            "Target: {} lbs in {} weeks",
            self.target_lbs, self.weeks_left
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HomeSummary {
    pub sleep: SleepSummary,
    pub activity: ActivitySummary,
    pub weight: WeightProgress,
}
