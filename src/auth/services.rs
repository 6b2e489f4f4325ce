use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{AuthResponse, Credentials},
    identity::Role,
    jwt::JwtKeys,
    password::{check_password_policy, hash_password, verify_password},
    repo_types::User,
};
use crate::{error::AppError, state::AppState};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid");
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::Unauthenticated("Invalid credentials".into())
}

pub async fn signup(st: &AppState, creds: Credentials) -> Result<User, AppError> {
    let email = normalize_email(&creds.email);
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    check_password_policy(&creds.password)?;

    if st.users.find_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let mut roles = vec![Role::User];
    if st.config.is_admin_email(&email) {
        roles.push(Role::Admin);
    }

    let hash = hash_password(&creds.password)?;
    let user = st.users.create(&email, &hash, &roles).await?;
    info!(user_id = %user.id, email = %user.email, ?roles, "user registered");
    Ok(user)
}

pub async fn login(st: &AppState, creds: Credentials) -> Result<AuthResponse, AppError> {
    let email = normalize_email(&creds.email);
    if email.is_empty() || creds.password.is_empty() {
        return Err(AppError::Validation("Email and password must be specified".into()));
    }

    let Some(user) = st.users.find_by_email(&email).await? else {
        warn!(%email, "login unknown email");
        return Err(invalid_credentials());
    };

    if !verify_password(&creds.password, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "login invalid password");
        return Err(invalid_credentials());
    }

    info!(user_id = %user.id, "user logged in");
    issue_tokens(st, user)
}

pub async fn refresh(st: &AppState, refresh_token: &str) -> Result<AuthResponse, AppError> {
    let keys = JwtKeys::from(&st.config.jwt);
    let claims = keys.verify_refresh(refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        AppError::Unauthenticated("Invalid refresh token".into())
    })?;

    // reload so role changes since the last login take effect
    let user = st
        .users
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("User not found".into()))?;
    issue_tokens(st, user)
}

pub async fn change_password(st: &AppState, user_id: Uuid, password: &str) -> Result<User, AppError> {
    check_password_policy(password)?;
    let hash = hash_password(password)?;
    let user = st
        .users
        .update_password(user_id, &hash)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("User does not exist".into()))?;
    info!(user_id = %user.id, "password changed");
    Ok(user)
}

pub async fn current_user(st: &AppState, user_id: Uuid) -> Result<User, AppError> {
    st.users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("User not found".into()))
}

fn issue_tokens(st: &AppState, user: User) -> Result<AuthResponse, AppError> {
    let keys = JwtKeys::from(&st.config.jwt);
    let token = keys.sign_access(&user)?;
    let refresh_token = keys.sign_refresh(&user)?;
    Ok(AuthResponse {
        token,
        refresh_token,
        user: user.into(),
    })
}
