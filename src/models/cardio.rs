use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "cardio_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CardioType {
    Run,
    Bike,
    Row,
    Swim,
    Walk,
    Elliptical,
    StairClimber,
    Other,
}

impl CardioType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardioType::Run => "run",
            CardioType::Bike => "bike",
            CardioType::Row => "row",
            CardioType::Swim => "swim",
            CardioType::Walk => "walk",
            CardioType::Elliptical => "elliptical",
            CardioType::StairClimber => "stair_climber",
            CardioType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardioType::Run => "Run",
            CardioType::Bike => "Bike",
            CardioType::Row => "Row",
            CardioType::Swim => "Swim",
            CardioType::Walk => "Walk",
            CardioType::Elliptical => "Elliptical",
            CardioType::StairClimber => "Stair climber",
            CardioType::Other => "Other",
        }
    }
}

/// A cardio activity record, independent of strength sessions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardioEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub cardio_type: CardioType,
    pub duration_seconds: i32,
    pub distance_meters: Option<f64>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardioEntry {
    pub cardio_type: CardioType,
    pub duration_seconds: i32,
    pub distance_meters: Option<f64>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}
