pub mod aggregator;
pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod stats;

use crate::state::AppState;
use axum::Router;

pub use repo::MealRepo;
pub use repo_types::{Meal, MealDetails, MealStats, Totals};

pub fn router() -> Router<AppState> {
    handlers::meal_routes()
}
