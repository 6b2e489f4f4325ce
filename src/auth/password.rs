use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Rejects passwords the service will not hash.
pub fn check_password_policy(plain: &str) -> Result<(), AppError> {
    if plain.is_empty() {
        return Err(AppError::Validation("Password is empty".into()));
    }
    if plain.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation("Password too short".into()));
    }
    Ok(())
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("123password").expect("hashing should succeed");
        assert!(verify_password("123password", &hash).expect("verify should succeed"));
        assert!(!verify_password("456password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("anything", "not-a-valid-hash").is_err());
    }

    #[test]
    fn policy_rejects_empty_and_short() {
        assert!(matches!(check_password_policy(""), Err(AppError::Validation(_))));
        assert!(matches!(check_password_policy("short"), Err(AppError::Validation(_))));
        assert!(check_password_policy("long-enough").is_ok());
    }
}
