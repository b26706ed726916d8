use async_trait::async_trait;

use crate::db::{DbPool, NewRegistration};
use crate::error::{AppError, AppResult};

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert an active registration. A second active row for the same
    /// pair is rejected by the store's unique index as `Conflict`.
    async fn save(&self, registration: NewRegistration) -> AppResult<()>;
    /// Soft delete the active registration for the pair, if any
    async fn delete(&self, event_id: i64, user_id: i64) -> AppResult<()>;
    /// Emails of active users holding an active registration for the event
    async fn find_attendee_emails(&self, event_id: i64) -> AppResult<Vec<String>>;
}

pub struct SqliteRegistrationRepository {
    db: DbPool,
}

impl SqliteRegistrationRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepository {
    async fn save(&self, registration: NewRegistration) -> AppResult<()> {
        sqlx::query("INSERT INTO registrations (event_id, user_id) VALUES (?, ?)")
            .bind(registration.event_id)
            .bind(registration.user_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                let err = AppError::classify_write(
                    e,
                    "Register record already exists",
                    "Unknown event or user",
                );
                match &err {
                    AppError::Database(e) => tracing::error!("Error saving registration: {}", e),
                    other => tracing::info!(
                        event_id = registration.event_id,
                        user_id = registration.user_id,
                        "Rejected registration: {}",
                        other
                    ),
                }
                err
            })?;

        Ok(())
    }

    async fn delete(&self, event_id: i64, user_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE registrations
            SET deleted_at = datetime('now'), updated_at = datetime('now')
            WHERE event_id = ? AND user_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        tracing::debug!(
            event_id,
            user_id,
            rows = result.rows_affected(),
            "Removed registration"
        );
        Ok(())
    }

    async fn find_attendee_emails(&self, event_id: i64) -> AppResult<Vec<String>> {
        let emails = sqlx::query_scalar::<_, String>(
            r#"
            SELECT u.email
            FROM registrations r
            INNER JOIN users u ON r.user_id = u.id
            WHERE r.event_id = ?
              AND r.deleted_at IS NULL
              AND u.deleted_at IS NULL
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.db)
        .await?;

        Ok(emails)
    }
}
