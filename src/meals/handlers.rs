use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{CreateMealRequest, MealStatsRequest},
    repo_types::{Meal, MealDetails, MealStats},
    services, stats,
};
use crate::{auth::AuthUser, dto::DeletedResponse, error::AppError, state::AppState};

// --- public routers ---

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/meals",
            get(list_meals).post(create_meal).delete(delete_all_meals),
        )
        // GET with a body as the old clients send it, POST for everyone else
        .route("/meals/stats", get(meal_stats).post(meal_stats))
        .route("/meals/:id", get(get_meal).delete(delete_meal))
}

// --- handlers ---

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CreateMealRequest>, JsonRejection>,
) -> Result<Json<Meal>, AppError> {
    let Json(body) =
        payload.map_err(|e| AppError::Validation(format!("Invalid meal: {}", e.body_text())))?;
    let meal = services::create_meal(&state, &caller, body.meal_type, body.foods).await?;
    Ok(Json(meal))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<MealDetails>>, AppError> {
    Ok(Json(services::list_meals(&state, &caller).await?))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealDetails>, AppError> {
    let meal = services::get_meal(&state, &caller, id)
        .await
        .map_err(|e| e.conceal("Meal"))?;
    Ok(Json(meal))
}

#[instrument(skip(state, payload))]
pub async fn meal_stats(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<MealStatsRequest>, JsonRejection>,
) -> Result<Json<Option<MealStats>>, AppError> {
    let Json(body) =
        payload.map_err(|e| AppError::Validation(format!("Invalid stats request: {}", e.body_text())))?;
    Ok(Json(stats::meal_stats(&state, &caller, &body.meal_ids).await?))
}

#[instrument(skip(state))]
pub async fn delete_all_meals(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = services::delete_all_meals(&state, &caller).await?;
    Ok(Json(DeletedResponse { deleted }))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = services::delete_meal(&state, &caller, id).await?;
    Ok(Json(DeletedResponse { deleted }))
}
