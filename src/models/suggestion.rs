use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Structured weekly workout recommendation, one per user per week
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutSuggestion {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_start: NaiveDate,
    /// Muscle-group ids ordered most-neglected first
    pub focus_muscle_groups: Vec<String>,
    pub sessions_per_week: i32,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}
