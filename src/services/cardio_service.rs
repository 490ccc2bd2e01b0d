use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CardioEntry, CreateCardioEntry};

const CARDIO_COLUMNS: &str =
    "id, user_id, cardio_type, duration_seconds, distance_meters, date, notes, created_at";

#[derive(Debug, Clone)]
pub struct CardioService {
    db: PgPool,
}

impl CardioService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_entry(
        &self,
        user_id: Uuid,
        data: CreateCardioEntry,
    ) -> Result<CardioEntry> {
        let entry = sqlx::query_as::<_, CardioEntry>(&format!(
            "INSERT INTO cardio_entries \
                 (id, user_id, cardio_type, duration_seconds, distance_meters, date, notes, \
                  created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CARDIO_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(data.cardio_type)
        .bind(data.duration_seconds)
        .bind(data.distance_meters)
        .bind(data.date)
        .bind(&data.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(entry)
    }

    pub async fn list_entries(
        &self,
        user_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CardioEntry>> {
        let entries = sqlx::query_as::<_, CardioEntry>(&format!(
            "SELECT {CARDIO_COLUMNS} FROM cardio_entries \
             WHERE user_id = $1 \
               AND ($2::DATE IS NULL OR date >= $2) \
               AND ($3::DATE IS NULL OR date <= $3) \
             ORDER BY date DESC"
        ))
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Owner-scoped delete
    pub async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cardio_entries WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
