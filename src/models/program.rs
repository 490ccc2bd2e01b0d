use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{ExerciseRef, ExerciseRefError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Program {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_template: bool,
    pub is_public: bool,
    pub install_count: i32,
    pub source_program_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgramVersion {
    pub id: Uuid,
    pub program_id: Uuid,
    pub name: String,
    pub position: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgramDay {
    pub id: Uuid,
    pub version_id: Uuid,
    pub name: String,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramDayExercise {
    pub id: Uuid,
    pub day_id: Uuid,
    pub exercise: ExerciseRef,
    pub position: i32,
    pub target_sets: i32,
    pub target_reps: i32,
    pub target_rpe: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProgramDayExerciseRow {
    pub id: Uuid,
    pub day_id: Uuid,
    pub exercise_id: Option<Uuid>,
    pub member_exercise_id: Option<Uuid>,
    pub position: i32,
    pub target_sets: i32,
    pub target_reps: i32,
    pub target_rpe: Option<f64>,
    pub notes: Option<String>,
}

impl TryFrom<ProgramDayExerciseRow> for ProgramDayExercise {
    type Error = ExerciseRefError;

    fn try_from(row: ProgramDayExerciseRow) -> Result<Self, Self::Error> {
        Ok(ProgramDayExercise {
            id: row.id,
            day_id: row.day_id,
            exercise: ExerciseRef::from_columns(row.exercise_id, row.member_exercise_id)?,
            position: row.position,
            target_sets: row.target_sets,
            target_reps: row.target_reps,
            target_rpe: row.target_rpe,
            notes: row.notes,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProgram {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProgram {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_template: Option<bool>,
    pub is_public: Option<bool>,
}

/// A program's structure loaded in position order, used by the clone
/// operation and the detail endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ProgramTree {
    pub program: Program,
    pub versions: Vec<VersionTree>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionTree {
    pub version: ProgramVersion,
    pub days: Vec<DayTree>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayTree {
    pub day: ProgramDay,
    pub exercises: Vec<ProgramDayExercise>,
}
