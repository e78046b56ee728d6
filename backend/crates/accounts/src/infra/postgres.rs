//! PostgreSQL Repository Implementation

use sqlx::PgPool;

use crate::domain::entity::{NewUser, User};
use crate::domain::repository::{UserRepository, validate_username};
use crate::error::AccountResult;
use kernel::id::UserId;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgAccountRepository {
    async fn find_by_username(&self, username: &str) -> AccountResult<Option<User>> {
        validate_username(username)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                password_hash,
                password_salt,
                first_name,
                last_name
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn create(&self, user: NewUser) -> AccountResult<bool> {
        // The unique index on username makes check-and-insert atomic:
        // a concurrent insert of the same name leaves rows_affected at 0.
        let inserted = sqlx::query(
            r#"
            INSERT INTO users (
                username,
                password_hash,
                password_salt,
                first_name,
                last_name
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            tracing::info!(username = %user.username, "User created");
        }

        Ok(inserted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    username: String,
    password_hash: Vec<u8>,
    password_salt: Vec<u8>,
    first_name: String,
    last_name: Option<String>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_i64(self.user_id),
            username: self.username,
            password_hash: self.password_hash,
            password_salt: self.password_salt,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}
