use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    identity::Role,
    repo_types::{User, UserRow},
};

/// Account storage used by the credential flows.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn create(&self, email: &str, password_hash: &str, roles: &[Role]) -> anyhow::Result<User>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> anyhow::Result<Option<User>>;
}

pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, roles, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, roles, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        row.map(User::try_from).transpose()
    }

    async fn create(&self, email: &str, password_hash: &str, roles: &[Role]) -> anyhow::Result<User> {
        let roles: Vec<String> = roles.iter().map(|r| r.as_str().to_string()).collect();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash, roles)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, roles, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(roles)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        User::try_from(row)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET password_hash = $2
            WHERE id = $1
            RETURNING id, email, password_hash, roles, created_at
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await
        .context("update user password")?;
        row.map(User::try_from).transpose()
    }
}

#[derive(Default)]
pub struct MemoryUserRepo {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str, roles: &[Role]) -> anyhow::Result<User> {
        let mut users = self.users.write().await;
        // mirrors the unique index on users.email
        anyhow::ensure!(
            !users.iter().any(|u| u.email == email),
            "duplicate email {email}"
        );
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            roles: roles.to_vec(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> anyhow::Result<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.password_hash = password_hash.to_string();
            u.clone()
        }))
    }
}
