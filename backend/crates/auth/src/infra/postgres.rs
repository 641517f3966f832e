//! PostgreSQL Store Implementation
//!
//! Remote store over a `users` table. Secrets are sealed with Argon2id
//! before they reach the database; only PHC strings are stored.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use platform::password::HashedPassword;

use crate::domain::entity::user::User;
use crate::domain::repository::UserStore;
use crate::domain::value_object::{secret::Secret, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                name,
                role,
                rw,
                created_at,
                last_password_change
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_credential_by_username(
        &self,
        username: &str,
    ) -> AuthResult<Option<(User, Secret)>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                id,
                username,
                name,
                role,
                rw,
                created_at,
                last_password_change,
                password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialRow::into_pair).transpose()
    }

    async fn find_id_by_username(&self, username: &str) -> AuthResult<Option<UserId>> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id.map(UserId::from_uuid))
    }

    async fn insert(&self, user: &User, password: &str) -> AuthResult<()> {
        let password_hash = HashedPassword::hash(password)?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                username,
                name,
                role,
                rw,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.name)
        .bind(user.role.code())
        .bind(&user.rw)
        .bind(password_hash.as_phc_string())
        .bind(user.created_at)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_secret(&self, id: &UserId, password: &str) -> AuthResult<()> {
        let password_hash = HashedPassword::hash(password)?;
        let now = Utc::now();

        let updated = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                last_password_change = $3,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(password_hash.as_phc_string())
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    name: String,
    role: String,
    rw: Option<String>,
    created_at: DateTime<Utc>,
    last_password_change: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_uuid(self.id),
            username: self.username,
            name: self.name,
            role: UserRole::from_code(&self.role),
            rw: self.rw,
            created_at: self.created_at,
            must_change_password: false,
            last_password_change: self.last_password_change,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    username: String,
    name: String,
    role: String,
    rw: Option<String>,
    created_at: DateTime<Utc>,
    last_password_change: Option<DateTime<Utc>>,
    password_hash: String,
}

impl CredentialRow {
    fn into_pair(self) -> AuthResult<(User, Secret)> {
        let secret = Secret::Argon2(HashedPassword::from_phc_string(self.password_hash)?);

        let user = User {
            id: UserId::from_uuid(self.id),
            username: self.username,
            name: self.name,
            role: UserRole::from_code(&self.role),
            rw: self.rw,
            created_at: self.created_at,
            must_change_password: false,
            last_password_change: self.last_password_change,
        };

        Ok((user, secret))
    }
}
