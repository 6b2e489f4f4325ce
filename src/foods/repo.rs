use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repo_types::{Food, NewFood};

/// Read side used by meal aggregation and food expansion.
#[async_trait]
pub trait FoodLookup: Send + Sync {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Food>>;
}

#[async_trait]
pub trait FoodRepo: FoodLookup {
    async fn list(&self) -> anyhow::Result<Vec<Food>>;
    async fn insert(&self, food: NewFood) -> anyhow::Result<Food>;
    /// Full replacement. `None` when the id is unknown.
    async fn update(&self, id: Uuid, food: NewFood) -> anyhow::Result<Option<Food>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn delete_all(&self) -> anyhow::Result<u64>;
}

const FOOD_COLUMNS: &str =
    "id, name, calories, serving_size, serving_size_units, servings, carbs, protein, fat, sodium";

pub struct PgFoodRepo {
    db: PgPool,
}

impl PgFoodRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodLookup for PgFoodRepo {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Food>> {
        let sql = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = $1");
        sqlx::query_as::<_, Food>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .with_context(|| format!("get food {id}"))
    }
}

#[async_trait]
impl FoodRepo for PgFoodRepo {
    async fn list(&self) -> anyhow::Result<Vec<Food>> {
        let sql = format!("SELECT {FOOD_COLUMNS} FROM foods ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Food>(&sql)
            .fetch_all(&self.db)
            .await
            .context("list foods")
    }

    async fn insert(&self, food: NewFood) -> anyhow::Result<Food> {
        let sql = format!(
            r#"
            INSERT INTO foods ({FOOD_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {FOOD_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Food>(&sql)
            .bind(Uuid::new_v4())
            .bind(&food.name)
            .bind(food.calories)
            .bind(food.serving_size)
            .bind(&food.serving_size_units)
            .bind(food.servings)
            .bind(food.carbs)
            .bind(food.protein)
            .bind(food.fat)
            .bind(food.sodium)
            .fetch_one(&self.db)
            .await
            .context("insert food")
    }

    async fn update(&self, id: Uuid, food: NewFood) -> anyhow::Result<Option<Food>> {
        let sql = format!(
            r#"
            UPDATE foods
               SET name = $2, calories = $3, serving_size = $4, serving_size_units = $5,
                   servings = $6, carbs = $7, protein = $8, fat = $9, sodium = $10
             WHERE id = $1
            RETURNING {FOOD_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Food>(&sql)
            .bind(id)
            .bind(&food.name)
            .bind(food.calories)
            .bind(food.serving_size)
            .bind(&food.serving_size_units)
            .bind(food.servings)
            .bind(food.carbs)
            .bind(food.protein)
            .bind(food.fat)
            .bind(food.sodium)
            .fetch_optional(&self.db)
            .await
            .with_context(|| format!("update food {id}"))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let done = sqlx::query("DELETE FROM foods WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .with_context(|| format!("delete food {id}"))?;
        Ok(done.rows_affected() > 0)
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        let done = sqlx::query("DELETE FROM foods")
            .execute(&self.db)
            .await
            .context("delete all foods")?;
        Ok(done.rows_affected())
    }
}

#[derive(Default)]
pub struct MemoryFoodRepo {
    foods: RwLock<Vec<Food>>,
}

#[async_trait]
impl FoodLookup for MemoryFoodRepo {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Food>> {
        Ok(self.foods.read().await.iter().find(|f| f.id == id).cloned())
    }
}

#[async_trait]
impl FoodRepo for MemoryFoodRepo {
    async fn list(&self) -> anyhow::Result<Vec<Food>> {
        Ok(self.foods.read().await.clone())
    }

    async fn insert(&self, food: NewFood) -> anyhow::Result<Food> {
        let food = food.with_id(Uuid::new_v4());
        self.foods.write().await.push(food.clone());
        Ok(food)
    }

    async fn update(&self, id: Uuid, food: NewFood) -> anyhow::Result<Option<Food>> {
        let mut foods = self.foods.write().await;
        Ok(foods.iter_mut().find(|f| f.id == id).map(|slot| {
            *slot = food.with_id(id);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut foods = self.foods.write().await;
        let before = foods.len();
        foods.retain(|f| f.id != id);
        Ok(foods.len() != before)
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        let mut foods = self.foods.write().await;
        let n = foods.len() as u64;
        foods.clear();
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> NewFood {
        NewFood {
            name: "Rice".into(),
            calories: 130.0,
            serving_size: 100.0,
            serving_size_units: "grams".into(),
            servings: 1.0,
            carbs: Some(28.0),
            protein: Some(2.7),
            fat: 0.3,
            sodium: None,
        }
    }

    #[tokio::test]
    async fn memory_repo_crud() {
        let repo = MemoryFoodRepo::default();
        let food = repo.insert(rice()).await.unwrap();
        assert_eq!(repo.get(food.id).await.unwrap().as_ref(), Some(&food));

        let mut changed = rice();
        changed.servings = 2.0;
        let updated = repo.update(food.id, changed).await.unwrap().unwrap();
        assert_eq!(updated.id, food.id);
        assert_eq!(updated.servings, 2.0);
        assert!(repo.update(Uuid::new_v4(), rice()).await.unwrap().is_none());

        assert!(repo.delete(food.id).await.unwrap());
        assert!(!repo.delete(food.id).await.unwrap());
        assert!(repo.get(food.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_repo_delete_all_counts() {
        let repo = MemoryFoodRepo::default();
        repo.insert(rice()).await.unwrap();
        repo.insert(rice()).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert!(repo.list().await.unwrap().is_empty());
    }
}
