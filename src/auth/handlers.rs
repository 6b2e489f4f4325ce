use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{AuthResponse, ChangePasswordRequest, Credentials, PublicUser, RefreshRequest},
    extractors::AuthUser,
    services,
};
use crate::{error::AppError, state::AppState};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/password", put(change_password))
        .route("/auth/me", get(get_me))
}

/// Missing fields and malformed bodies are client errors, not 422s.
fn auth_payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e.body_text())))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<PublicUser>, AppError> {
    let user = services::signup(&state, auth_payload(payload)?).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    Ok(Json(services::login(&state, auth_payload(payload)?).await?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let body = auth_payload(payload)?;
    Ok(Json(services::refresh(&state, &body.refresh_token).await?))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<PublicUser>, AppError> {
    let body = auth_payload(payload)?;
    let user = services::change_password(&state, caller.user_id, &body.password).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = services::current_user(&state, caller.user_id).await?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::Role;

    #[test]
    fn public_user_serialization_hides_hash() {
        let response = PublicUser {
            id: uuid::Uuid::new_v4(),
            email: "test@example.com".to_string(),
            roles: vec![Role::User],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains(r#""roles":["user"]"#));
        assert!(!json.contains("password"));
    }
}
