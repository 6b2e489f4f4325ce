use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    repo_types::{Food, NewFood},
    services,
};
use crate::{auth::AuthUser, dto::DeletedResponse, error::AppError, state::AppState};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/foods",
            get(list_foods).post(create_food).delete(delete_all_foods),
        )
        .route(
            "/foods/:id",
            get(get_food).put(update_food).delete(delete_food),
        )
}

/// Malformed JSON and missing required fields are client errors.
fn food_payload(payload: Result<Json<NewFood>, JsonRejection>) -> Result<NewFood, AppError> {
    payload
        .map(|Json(food)| food)
        .map_err(|e| AppError::Validation(format!("Invalid food: {}", e.body_text())))
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<NewFood>, JsonRejection>,
) -> Result<Json<Food>, AppError> {
    let food = services::create_food(&state, &caller, food_payload(payload)?).await?;
    Ok(Json(food))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
) -> Result<Json<Vec<Food>>, AppError> {
    Ok(Json(services::list_foods(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Food>, AppError> {
    Ok(Json(services::get_food(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_food(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
    payload: Result<Json<NewFood>, JsonRejection>,
) -> Result<Json<Food>, AppError> {
    Ok(Json(services::update_food(&state, id, food_payload(payload)?).await?))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    services::delete_food(&state, id).await?;
    Ok(Json(DeletedResponse { deleted: 1 }))
}

#[instrument(skip(state))]
pub async fn delete_all_foods(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = services::delete_all_foods(&state, &caller).await?;
    Ok(Json(DeletedResponse { deleted }))
}
