use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::foods::Food;

/// Nutrition totals derived from a meal's foods at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_calories: f64,
    pub total_carb: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_sodium: f64,
}

impl Totals {
    /// Adds one occurrence of `food`, scaled by its servings. Missing
    /// optional nutrients count as zero.
    pub fn add_food(&mut self, food: &Food) {
        let s = food.servings;
        self.total_calories += food.calories * s;
        self.total_carb += food.carbs.unwrap_or(0.0) * s;
        self.total_protein += food.protein.unwrap_or(0.0) * s;
        self.total_fat += food.fat * s;
        self.total_sodium += food.sodium.unwrap_or(0.0) * s;
    }
}

/// Persisted meal. `foods` keeps request order and duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_type: String,
    pub foods: Vec<Uuid>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub totals: Totals,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMeal {
    pub user_id: Uuid,
    pub meal_type: String,
    pub foods: Vec<Uuid>,
    pub totals: Totals,
}

/// Meal as returned by reads: each food id replaced by its record, or
/// `null` when the food no longer resolves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_type: String,
    pub foods: Vec<Option<Food>>,
    #[serde(flatten)]
    pub totals: Totals,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Summed totals over a caller-chosen subset of their meals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealStats {
    pub meal_ids: Vec<Uuid>,
    pub total_meal_plan_calories: f64,
    pub total_meal_plan_carb: f64,
    pub total_meal_plan_protein: f64,
    pub total_meal_plan_fat: f64,
    pub total_meal_plan_sodium: f64,
}

impl MealStats {
    pub fn add_meal(&mut self, meal: &Meal) {
        self.meal_ids.push(meal.id);
        self.total_meal_plan_calories += meal.totals.total_calories;
        self.total_meal_plan_carb += meal.totals.total_carb;
        self.total_meal_plan_protein += meal.totals.total_protein;
        self.total_meal_plan_fat += meal.totals.total_fat;
        self.total_meal_plan_sodium += meal.totals.total_sodium;
    }
}
