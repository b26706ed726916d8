use async_trait::async_trait;

use crate::auth::verify_password;
use crate::db::{DbPool, UpsertUser, User, UserResponse};
use crate::error::{AppError, AppResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, or replace the active user with the same id
    async fn save(&self, user: UpsertUser) -> AppResult<User>;
    async fn find_all(&self) -> AppResult<Vec<UserResponse>>;
    async fn find_by_id(&self, id: i64) -> AppResult<User>;
    /// Soft delete
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
    /// Look up by email and check the password against the stored hash.
    /// Unknown email and wrong password fail identically.
    async fn verify(&self, email: &str, password: &str) -> AppResult<User>;
}

pub struct SqliteUserRepository {
    db: DbPool,
}

impl SqliteUserRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: UpsertUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, role_id)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                password_hash = excluded.password_hash,
                role_id = excluded.role_id,
                updated_at = datetime('now')
            RETURNING id, email, password_hash, role_id
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            let err = AppError::classify_write(e, "Email already used", "Unknown role");
            match &err {
                AppError::Database(e) => tracing::error!("Error saving user: {}", e),
                other => tracing::info!("Rejected user save: {}", other),
            }
            err
        })
    }

    async fn find_all(&self) -> AppResult<Vec<UserResponse>> {
        let users = sqlx::query_as::<_, UserResponse>(
            "SELECT id, email, role_id FROM users WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role_id FROM users WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::classify_read(e, "User not found"))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = datetime('now') WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        Ok(())
    }

    async fn verify(&self, email: &str, password: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role_id FROM users WHERE email = ? AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        let Some(user) = user else {
            tracing::info!("Login attempt for unknown email");
            return Err(AppError::unauthenticated("Invalid credentials"));
        };

        if !verify_password(password, &user.password_hash) {
            tracing::info!(user_id = user.id, "Login attempt with wrong password");
            return Err(AppError::unauthenticated("Invalid credentials"));
        }

        Ok(user)
    }
}
