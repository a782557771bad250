//! Dietary plan payload: one `DailyPlan` per day, four meal slots per day.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CollectionSource, DataSource, FetchError};
use crate::auth::Session;
use crate::view_state::IsEmpty;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub name: String,
    pub description: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MealItem {
    /// `"350 kcal • P:10g C:55g F:12g"`
    pub fn macros_line(&self) -> String {
        format!(
            "{} kcal • P:{}g C:{}g F:{}g",
            self.calories, self.protein, self.carbs, self.fats
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyMeals {
    pub breakfast: MealItem,
    pub lunch: MealItem,
    pub dinner: MealItem,
    #[serde(default)]
    pub snacks: Vec<MealItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub day: String,
    pub meals: DailyMeals,
}

/// Summed macros for a day
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

impl DailyPlan {
    /// Meals in display order with their slot label ("Breakfast" … "Snack 2")
    pub fn labelled_meals(&self) -> Vec<(String, &MealItem)> {
        let mut meals = vec![
            ("Breakfast".to_string(), &self.meals.breakfast),
            ("Lunch".to_string(), &self.meals.lunch),
            ("Dinner".to_string(), &self.meals.dinner),
        ];
        meals.extend(
            self.meals
                .snacks
                .iter()
                .enumerate()
                .map(|(i, snack)| (format!("Snack {}", i + 1), snack)),
        );
        meals
    }

    pub fn totals(&self) -> Totals {
        self.labelled_meals()
            .into_iter()
            .fold(Totals::default(), |acc, (_, meal)| Totals {
                calories: acc.calories + meal.calories,
                protein: acc.protein + meal.protein,
                carbs: acc.carbs + meal.carbs,
                fats: acc.fats + meal.fats,
            })
    }
}

/// A full plan; empty means "no plan yet".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DietPlan(pub Vec<DailyPlan>);

impl DietPlan {
    pub fn days(&self) -> &[DailyPlan] {
        &self.0
    }

    /// Day at `index`, clamped to the plan
    pub fn day(&self, index: usize) -> Option<&DailyPlan> {
        self.0.get(index.min(self.0.len().saturating_sub(1)))
    }
}

impl From<Vec<DailyPlan>> for DietPlan {
    fn from(days: Vec<DailyPlan>) -> Self {
        Self(days)
    }
}

impl IsEmpty for DietPlan {
    fn is_empty_payload(&self) -> bool {
        self.0.is_empty()
    }
}

/// Remote plan: one document per day under `users/{uid}/dietPlan`
#[async_trait]
impl DataSource<DietPlan> for CollectionSource<DailyPlan> {
    async fn load(&self, session: Option<&Session>) -> Result<DietPlan, FetchError> {
        let days: Vec<DailyPlan> = DataSource::<Vec<DailyPlan>>::load(self, session).await?;
        Ok(DietPlan(days))
    }
}
