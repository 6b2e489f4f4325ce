pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{FoodLookup, FoodRepo};
pub use repo_types::{Food, NewFood};

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}
