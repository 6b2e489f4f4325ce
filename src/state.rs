use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    auth::repo::{MemoryUserRepo, PgUserRepo, UserRepo},
    config::{AppConfig, JwtConfig},
    foods::repo::{FoodRepo, MemoryFoodRepo, PgFoodRepo},
    meals::repo::{MealRepo, MemoryMealRepo, PgMealRepo},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub foods: Arc<dyn FoodRepo>,
    pub meals: Arc<dyn MealRepo>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let Some(database_url) = config.database_url.clone() else {
            tracing::warn!("DATABASE_URL not set; using in-memory stores, data is lost on restart");
            return Ok(Self::in_memory(config));
        };

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self {
            config: Arc::new(config),
            users: Arc::new(PgUserRepo::new(db.clone())),
            foods: Arc::new(PgFoodRepo::new(db.clone())),
            meals: Arc::new(PgMealRepo::new(db)),
        })
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            users: Arc::new(MemoryUserRepo::default()),
            foods: Arc::new(MemoryFoodRepo::default()),
            meals: Arc::new(MemoryMealRepo::default()),
        }
    }

    /// In-memory state with a fixed signing secret, for tests.
    pub fn in_memory_for_tests(admin_emails: &[&str]) -> Self {
        Self::in_memory(AppConfig {
            database_url: None,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            admin_emails: admin_emails.iter().map(|e| e.to_lowercase()).collect(),
            host: "127.0.0.1".into(),
            port: 0,
        })
    }
}
