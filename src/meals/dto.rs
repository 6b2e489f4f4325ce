use serde::Deserialize;
use uuid::Uuid;

/// Body of `POST /meals`. Unknown fields such as a client-sent `userId`
/// are ignored; the owner always comes from the access token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub meal_type: String,
    pub foods: Vec<Uuid>,
}

/// Body of `/meals/stats`. Ids stay raw so a malformed one can be named.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealStatsRequest {
    #[serde(default)]
    pub meal_ids: Vec<String>,
}
