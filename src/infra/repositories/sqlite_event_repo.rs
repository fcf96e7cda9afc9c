use std::sync::Arc;

use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use crate::infra::db::SqliteDb;
use async_trait::async_trait;

pub struct SqliteEventRepo {
    db: Arc<SqliteDb>,
}

impl SqliteEventRepo {
    pub fn new(db: Arc<SqliteDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        let pool = self.db.pool().await?;

        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, title, slug, description, overview, image, venue, location,
                date, time, mode, audience, agenda, organizer, tags, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&event.id)
            .bind(&event.title)
            .bind(&event.slug)
            .bind(&event.description)
            .bind(&event.overview)
            .bind(&event.image)
            .bind(&event.venue)
            .bind(&event.location)
            .bind(&event.date)
            .bind(&event.time)
            .bind(&event.mode)
            .bind(&event.audience)
            .bind(&event.agenda)
            .bind(&event.organizer)
            .bind(&event.tags)
            .bind(event.created_at)
            .bind(event.updated_at)
            .fetch_one(pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, AppError> {
        let pool = self.db.pool().await?;

        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE slug = ?")
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        let pool = self.db.pool().await?;

        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let pool = self.db.pool().await?;

        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date, time")
            .fetch_all(pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_related_by_tags(&self, tags: &[String], exclude_id: &str) -> Result<Vec<Event>, AppError> {
        let pool = self.db.pool().await?;
        let tags_json = serde_json::to_string(tags).map_err(|_| AppError::Internal)?;

        sqlx::query_as::<_, Event>(
            r#"SELECT e.* FROM events e
               WHERE e.id != ?
                 AND EXISTS (
                     SELECT 1 FROM json_each(e.tags)
                     WHERE value IN (SELECT value FROM json_each(?))
                 )
               ORDER BY e.date, e.time"#
        )
            .bind(exclude_id)
            .bind(tags_json)
            .fetch_all(pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        let pool = self.db.pool().await?;

        sqlx::query_as::<_, Event>(
            r#"UPDATE events SET
                title=?, slug=?, description=?, overview=?, image=?, venue=?, location=?,
                date=?, time=?, mode=?, audience=?, agenda=?, organizer=?, tags=?, updated_at=?
               WHERE id=? RETURNING *"#
        )
            .bind(&event.title)
            .bind(&event.slug)
            .bind(&event.description)
            .bind(&event.overview)
            .bind(&event.image)
            .bind(&event.venue)
            .bind(&event.location)
            .bind(&event.date)
            .bind(&event.time)
            .bind(&event.mode)
            .bind(&event.audience)
            .bind(&event.agenda)
            .bind(&event.organizer)
            .bind(&event.tags)
            .bind(event.updated_at)
            .bind(&event.id)
            .fetch_one(pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let pool = self.db.pool().await?;

        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
