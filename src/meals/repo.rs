use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repo_types::{Meal, NewMeal};

/// Persisted meals. Listing order is creation order.
#[async_trait]
pub trait MealRepo: Send + Sync {
    async fn insert(&self, meal: NewMeal) -> anyhow::Result<Meal>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Meal>>;
    async fn find_by_owner(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Meal>>;
    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<u64>;
    async fn delete_by_owner(&self, user_id: Uuid) -> anyhow::Result<u64>;
    async fn delete_all(&self) -> anyhow::Result<u64>;
}

const MEAL_COLUMNS: &str = "id, user_id, meal_type, foods, total_calories, total_carb, \
                            total_protein, total_fat, total_sodium, created_at";

pub struct PgMealRepo {
    db: PgPool,
}

impl PgMealRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealRepo for PgMealRepo {
    async fn insert(&self, meal: NewMeal) -> anyhow::Result<Meal> {
        let sql = format!(
            r#"
            INSERT INTO meals (id, user_id, meal_type, foods, total_calories, total_carb,
                               total_protein, total_fat, total_sodium)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {MEAL_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Meal>(&sql)
            .bind(Uuid::new_v4())
            .bind(meal.user_id)
            .bind(&meal.meal_type)
            .bind(&meal.foods)
            .bind(meal.totals.total_calories)
            .bind(meal.totals.total_carb)
            .bind(meal.totals.total_protein)
            .bind(meal.totals.total_fat)
            .bind(meal.totals.total_sodium)
            .fetch_one(&self.db)
            .await
            .context("insert meal")
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Meal>> {
        let sql = format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1");
        sqlx::query_as::<_, Meal>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .with_context(|| format!("get meal {id}"))
    }

    async fn find_by_owner(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let sql = format!(
            "SELECT {MEAL_COLUMNS} FROM meals WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Meal>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
            .with_context(|| format!("list meals of user {user_id}"))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Meal>> {
        let sql = format!("SELECT {MEAL_COLUMNS} FROM meals ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Meal>(&sql)
            .fetch_all(&self.db)
            .await
            .context("list all meals")
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<u64> {
        let done = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .with_context(|| format!("delete meal {id}"))?;
        Ok(done.rows_affected())
    }

    async fn delete_by_owner(&self, user_id: Uuid) -> anyhow::Result<u64> {
        let done = sqlx::query("DELETE FROM meals WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await
            .with_context(|| format!("delete meals of user {user_id}"))?;
        Ok(done.rows_affected())
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        let done = sqlx::query("DELETE FROM meals")
            .execute(&self.db)
            .await
            .context("delete all meals")?;
        Ok(done.rows_affected())
    }
}

#[derive(Default)]
pub struct MemoryMealRepo {
    meals: RwLock<Vec<Meal>>,
}

impl MemoryMealRepo {
    async fn remove_where(&self, pred: impl Fn(&Meal) -> bool) -> u64 {
        let mut meals = self.meals.write().await;
        let before = meals.len();
        meals.retain(|m| !pred(m));
        (before - meals.len()) as u64
    }
}

#[async_trait]
impl MealRepo for MemoryMealRepo {
    async fn insert(&self, meal: NewMeal) -> anyhow::Result<Meal> {
        let meal = Meal {
            id: Uuid::new_v4(),
            user_id: meal.user_id,
            meal_type: meal.meal_type,
            foods: meal.foods,
            totals: meal.totals,
            created_at: OffsetDateTime::now_utc(),
        };
        self.meals.write().await.push(meal.clone());
        Ok(meal)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Meal>> {
        Ok(self.meals.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        Ok(self
            .meals
            .read()
            .await
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Meal>> {
        Ok(self.meals.read().await.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<u64> {
        Ok(self.remove_where(|m| m.id == id).await)
    }

    async fn delete_by_owner(&self, user_id: Uuid) -> anyhow::Result<u64> {
        Ok(self.remove_where(|m| m.user_id == user_id).await)
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        Ok(self.remove_where(|_| true).await)
    }
}
