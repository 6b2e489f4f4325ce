use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// Nutritional record. Every nutrient value is per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub serving_size: f64,
    pub serving_size_units: String,
    pub servings: f64,
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub fat: f64,
    pub sodium: Option<f64>,
}

/// Food fields supplied by a client on create and on full replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFood {
    pub name: String,
    pub calories: f64,
    pub serving_size: f64,
    pub serving_size_units: String,
    pub servings: f64,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    pub fat: f64,
    #[serde(default)]
    pub sodium: Option<f64>,
}

impl NewFood {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Food name is required".into()));
        }
        if self.serving_size_units.trim().is_empty() {
            return Err(AppError::Validation("servingSizeUnits is required".into()));
        }
        let amounts = [
            ("calories", Some(self.calories)),
            ("servingSize", Some(self.serving_size)),
            ("servings", Some(self.servings)),
            ("carbs", self.carbs),
            ("protein", self.protein),
            ("fat", Some(self.fat)),
            ("sodium", self.sodium),
        ];
        for (field, value) in amounts {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(AppError::Validation(format!(
                        "{field} must be a non-negative number"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn with_id(self, id: Uuid) -> Food {
        Food {
            id,
            name: self.name,
            calories: self.calories,
            serving_size: self.serving_size,
            serving_size_units: self.serving_size_units,
            servings: self.servings,
            carbs: self.carbs,
            protein: self.protein,
            fat: self.fat,
            sodium: self.sodium,
        }
    }
}
