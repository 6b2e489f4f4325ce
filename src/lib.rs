pub mod app;
pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod foods;
pub mod meals;
pub mod policy;
pub mod state;

pub use app::build_app;
pub use error::AppError;
pub use state::AppState;
