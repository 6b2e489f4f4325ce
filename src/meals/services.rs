use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    aggregator,
    repo_types::{Meal, MealDetails, NewMeal},
};
use crate::{
    auth::Caller,
    error::AppError,
    foods::FoodLookup,
    policy::{self, DeleteScope},
    state::AppState,
};

/// Creates a meal owned by the caller. Nothing is written unless every food
/// id resolves.
pub async fn create_meal(
    st: &AppState,
    caller: &Caller,
    meal_type: String,
    foods: Vec<Uuid>,
) -> Result<Meal, AppError> {
    if st.users.find_by_id(caller.user_id).await?.is_none() {
        warn!(user_id = %caller.user_id, "meal create for unknown user");
        return Err(AppError::UnknownUser);
    }

    let meal_type = meal_type.trim().to_string();
    if meal_type.is_empty() {
        return Err(AppError::Validation("mealType is required".into()));
    }

    let totals = aggregator::compute(st.foods.as_ref(), &foods).await?;
    let meal = st
        .meals
        .insert(NewMeal {
            user_id: caller.user_id,
            meal_type,
            foods,
            totals,
        })
        .await?;
    info!(meal_id = %meal.id, user_id = %meal.user_id, calories = meal.totals.total_calories, "meal created");
    Ok(meal)
}

/// Admins get every meal, everyone else only their own.
pub async fn list_meals(st: &AppState, caller: &Caller) -> Result<Vec<MealDetails>, AppError> {
    let meals = if policy::can_list_all(caller) {
        st.meals.find_all().await?
    } else {
        st.meals.find_by_owner(caller.user_id).await?
    };

    let mut out = Vec::with_capacity(meals.len());
    for meal in meals {
        out.push(expand(st.foods.as_ref(), meal).await?);
    }
    debug!(user_id = %caller.user_id, count = out.len(), "meals listed");
    Ok(out)
}

/// `Forbidden` for a meal the caller may not see; the HTTP layer reports it
/// as not found.
pub async fn get_meal(st: &AppState, caller: &Caller, id: Uuid) -> Result<MealDetails, AppError> {
    let meal = st
        .meals
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Meal"))?;
    let meal = expand(st.foods.as_ref(), meal).await?;

    if !policy::can_view_meal(caller, &meal) {
        warn!(user_id = %caller.user_id, meal_id = %id, "meal view denied");
        return Err(AppError::Forbidden);
    }
    Ok(meal)
}

/// Not isolated from concurrent creates: a meal inserted while the delete
/// runs may survive it.
pub async fn delete_all_meals(st: &AppState, caller: &Caller) -> Result<u64, AppError> {
    let deleted = match policy::delete_all_scope(caller) {
        DeleteScope::Global => st.meals.delete_all().await?,
        DeleteScope::OwnOnly => st.meals.delete_by_owner(caller.user_id).await?,
    };
    info!(user_id = %caller.user_id, deleted, "meals deleted");
    Ok(deleted)
}

/// Deleting a meal the caller may not delete, or one that does not exist,
/// removes nothing and is not an error.
pub async fn delete_meal(st: &AppState, caller: &Caller, id: Uuid) -> Result<u64, AppError> {
    let Some(meal) = st.meals.find_by_id(id).await? else {
        return Ok(0);
    };
    if !policy::can_delete_meal(caller, &meal) {
        warn!(user_id = %caller.user_id, meal_id = %id, "meal delete skipped, not owner");
        return Ok(0);
    }
    let deleted = st.meals.delete_by_id(id).await?;
    info!(user_id = %caller.user_id, meal_id = %id, deleted, "meal deleted");
    Ok(deleted)
}

/// Resolves each food occurrence in order. A food that no longer exists
/// becomes `None` instead of failing the read.
pub async fn expand<L>(lookup: &L, meal: Meal) -> Result<MealDetails, AppError>
where
    L: FoodLookup + ?Sized,
{
    let mut foods = Vec::with_capacity(meal.foods.len());
    for id in &meal.foods {
        let food = lookup.get(*id).await?;
        if food.is_none() {
            debug!(meal_id = %meal.id, food_id = %id, "dangling food reference");
        }
        foods.push(food);
    }
    Ok(MealDetails {
        id: meal.id,
        user_id: meal.user_id,
        meal_type: meal.meal_type,
        foods,
        totals: meal.totals,
        created_at: meal.created_at,
    })
}
