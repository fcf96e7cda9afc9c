use std::sync::Arc;

use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use crate::infra::db::SqliteDb;
use async_trait::async_trait;

pub struct SqliteBookingRepo {
    db: Arc<SqliteDb>,
}

impl SqliteBookingRepo {
    pub fn new(db: Arc<SqliteDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let pool = self.db.pool().await?;

        sqlx::query_as::<_, Booking>(
            r#"INSERT INTO bookings (id, event_id, email, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?) RETURNING *"#
        )
            .bind(&booking.id)
            .bind(&booking.event_id)
            .bind(&booking.email)
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .fetch_one(pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        let pool = self.db.pool().await?;

        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError> {
        let pool = self.db.pool().await?;

        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE event_id = ? ORDER BY created_at DESC",
        )
            .bind(event_id)
            .fetch_all(pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        let pool = self.db.pool().await?;

        sqlx::query_as::<_, Booking>(
            r#"UPDATE bookings SET event_id=?, email=?, updated_at=?
               WHERE id=? RETURNING *"#
        )
            .bind(&booking.event_id)
            .bind(&booking.email)
            .bind(booking.updated_at)
            .bind(&booking.id)
            .fetch_one(pool)
            .await
            .map_err(AppError::Database)
    }
}
