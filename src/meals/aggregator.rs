use tracing::{debug, warn};
use uuid::Uuid;

use super::repo_types::Totals;
use crate::{error::AppError, foods::FoodLookup};

/// Sums `nutrient * servings` over every occurrence in `food_refs`.
///
/// Lookups run one at a time, left to right, and stop at the first id that
/// does not resolve, which is reported as `UnresolvedFood`. Ids after it are
/// never looked up.
pub async fn compute<L>(lookup: &L, food_refs: &[Uuid]) -> Result<Totals, AppError>
where
    L: FoodLookup + ?Sized,
{
    let mut totals = Totals::default();
    for id in food_refs {
        let Some(food) = lookup.get(*id).await? else {
            warn!(food_id = %id, "unresolved food reference");
            return Err(AppError::UnresolvedFood(id.to_string()));
        };
        totals.add_food(&food);
    }
    debug!(foods = food_refs.len(), calories = totals.total_calories, "meal totals computed");
    Ok(totals)
}
