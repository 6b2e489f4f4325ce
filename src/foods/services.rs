use tracing::{info, warn};
use uuid::Uuid;

use super::repo_types::{Food, NewFood};
use crate::{auth::Caller, error::AppError, policy, state::AppState};

pub async fn create_food(st: &AppState, caller: &Caller, food: NewFood) -> Result<Food, AppError> {
    food.validate()?;
    let food = st.foods.insert(food).await?;
    info!(food_id = %food.id, user_id = %caller.user_id, "food created");
    Ok(food)
}

pub async fn list_foods(st: &AppState) -> Result<Vec<Food>, AppError> {
    Ok(st.foods.list().await?)
}

pub async fn get_food(st: &AppState, id: Uuid) -> Result<Food, AppError> {
    st.foods
        .get(id)
        .await?
        .ok_or_else(|| AppError::Validation("Food does not exist".into()))
}

/// Later meal aggregations see the new values; existing meal totals are kept.
pub async fn update_food(st: &AppState, id: Uuid, food: NewFood) -> Result<Food, AppError> {
    food.validate()?;
    let food = st
        .foods
        .update(id, food)
        .await?
        .ok_or_else(|| AppError::Validation("Food does not exist".into()))?;
    info!(food_id = %food.id, "food updated");
    Ok(food)
}

/// Meals referencing the food keep the id; their expansion yields `null`.
pub async fn delete_food(st: &AppState, id: Uuid) -> Result<(), AppError> {
    if !st.foods.delete(id).await? {
        warn!(food_id = %id, "delete of unknown food");
        return Err(AppError::Validation("Food does not exist".into()));
    }
    info!(food_id = %id, "food deleted");
    Ok(())
}

pub async fn delete_all_foods(st: &AppState, caller: &Caller) -> Result<u64, AppError> {
    if !policy::can_delete_all_foods(caller) {
        warn!(user_id = %caller.user_id, "non-admin attempted to delete all foods");
        return Err(AppError::Forbidden);
    }
    let n = st.foods.delete_all().await?;
    info!(user_id = %caller.user_id, deleted = n, "all foods deleted");
    Ok(n)
}
