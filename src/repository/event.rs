use async_trait::async_trait;

use crate::db::{DbPool, Event, UpsertEvent};
use crate::error::{AppError, AppResult};

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event, or replace the mutable columns of an existing one.
    /// The owner column is written on insert only.
    async fn save(&self, event: UpsertEvent) -> AppResult<Event>;
    async fn find_all(&self) -> AppResult<Vec<Event>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Event>;
    /// Soft delete
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteEventRepository {
    db: DbPool,
}

impl SqliteEventRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn save(&self, event: UpsertEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, name, description, location, event_time, user_id)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                location = excluded.location,
                event_time = excluded.event_time,
                updated_at = datetime('now')
            RETURNING id, name, description, location, event_time, user_id
            "#,
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.event_time)
        .bind(event.user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            let err = AppError::classify_write(e, "Event already exists", "Unknown owner");
            if let AppError::Database(e) = &err {
                tracing::error!("Error saving event: {}", e);
            }
            err
        })
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, description, location, event_time, user_id
            FROM events
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(events)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, description, location, event_time, user_id
            FROM events
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::classify_read(e, "Event not found"))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE events SET deleted_at = datetime('now') WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Event not found"));
        }

        Ok(())
    }
}
