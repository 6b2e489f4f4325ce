use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use super::repo_types::MealStats;
use crate::{auth::Caller, error::AppError, state::AppState};

/// Parses every reference before touching storage; one malformed id fails
/// the whole call.
pub fn parse_meal_ids(raw: &[String]) -> Result<Vec<Uuid>, AppError> {
    raw.iter()
        .map(|s| {
            Uuid::parse_str(s).map_err(|_| {
                warn!(meal_id = %s, "malformed meal reference");
                AppError::InvalidReference(s.clone())
            })
        })
        .collect()
}

/// Sums totals over the caller's own meals among `meal_ids`. Ids that are
/// unknown or owned by someone else are skipped. `None` when nothing
/// matched.
pub async fn meal_stats(
    st: &AppState,
    caller: &Caller,
    meal_ids: &[String],
) -> Result<Option<MealStats>, AppError> {
    let wanted: HashSet<Uuid> = parse_meal_ids(meal_ids)?.into_iter().collect();

    let owned = st.meals.find_by_owner(caller.user_id).await?;
    let stats = owned
        .iter()
        .filter(|m| wanted.contains(&m.id))
        .fold(None, |acc: Option<MealStats>, meal| {
            let mut s = acc.unwrap_or_default();
            s.add_meal(meal);
            Some(s)
        });

    debug!(
        user_id = %caller.user_id,
        requested = meal_ids.len(),
        matched = stats.as_ref().map_or(0, |s| s.meal_ids.len()),
        "meal stats computed"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_uuids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_meal_ids(&[id.to_string()]).unwrap(), vec![id]);
        assert!(parse_meal_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn parse_names_the_malformed_id() {
        let good = Uuid::new_v4().to_string();
        let err = parse_meal_ids(&[good, "123".into(), "abc".into()]).unwrap_err();
        match err {
            AppError::InvalidReference(id) => assert_eq!(id, "123"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn padded_id_is_malformed() {
        let padded = format!(" {} ", Uuid::new_v4());
        let err = parse_meal_ids(&[padded.clone()]).unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(id) if id == padded));
    }
}
