use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::identity::{Caller, Role};

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,                     // unique user ID
    pub email: String,                // user email
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 hash, not exposed in JSON
    pub roles: Vec<Role>,             // granted roles
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,   // creation timestamp
}

impl User {
    pub fn caller(&self) -> Caller {
        Caller::new(self.id, self.email.clone(), self.roles.iter().copied())
    }
}

/// Raw `users` row; roles are stored as text.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub created_at: OffsetDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let roles = r
            .roles
            .iter()
            .map(|s| s.parse::<Role>())
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self {
            id: r.id,
            email: r.email,
            password_hash: r.password_hash,
            roles,
            created_at: r.created_at,
        })
    }
}
