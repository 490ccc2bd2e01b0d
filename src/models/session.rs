use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{ExerciseRef, ExerciseRefError};

/// One workout occurrence. Immutable after completion except by deletion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainingSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub scheduled_for: Option<NaiveDate>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub is_planned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrainingSession {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTrainingSession {
    pub title: String,
    pub scheduled_for: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_planned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTrainingSession {
    pub title: Option<String>,
    pub scheduled_for: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Set tag describing the role of a set within an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "set_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    Normal,
    WarmUp,
    TopSet,
    BackOff,
    Dropset,
    Amrap,
}

impl Default for SetType {
    fn default() -> Self {
        SetType::Normal
    }
}

impl SetType {
    pub fn label(&self) -> &'static str {
        match self {
            SetType::Normal => "Normal",
            SetType::WarmUp => "Warm-up",
            SetType::TopSet => "Top set",
            SetType::BackOff => "Back-off",
            SetType::Dropset => "Dropset",
            SetType::Amrap => "AMRAP",
        }
    }
}

/// One exercise instance within a session, ordered by `position`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExercise {
    pub id: Uuid,
    pub session_id: Uuid,
    pub exercise: ExerciseRef,
    pub position: i32,
    pub notes: Option<String>,
}

/// Raw storage row for a session exercise; decoded into [`SessionExercise`]
/// at the service boundary.
#[derive(Debug, Clone, FromRow)]
pub struct SessionExerciseRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub exercise_id: Option<Uuid>,
    pub member_exercise_id: Option<Uuid>,
    pub position: i32,
    pub notes: Option<String>,
}

impl TryFrom<SessionExerciseRow> for SessionExercise {
    type Error = ExerciseRefError;

    fn try_from(row: SessionExerciseRow) -> Result<Self, Self::Error> {
        Ok(SessionExercise {
            id: row.id,
            session_id: row.session_id,
            exercise: ExerciseRef::from_columns(row.exercise_id, row.member_exercise_id)?,
            position: row.position,
            notes: row.notes,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddSessionExercise {
    pub exercise: ExerciseRef,
    pub notes: Option<String>,
}

/// One set within a session exercise
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionSet {
    pub id: Uuid,
    pub session_exercise_id: Uuid,
    pub set_index: i32,
    pub prescribed_reps: Option<i32>,
    pub prescribed_weight_kg: Option<f64>,
    pub prescribed_rpe: Option<f64>,
    pub performed_reps: Option<i32>,
    pub performed_weight_kg: Option<f64>,
    pub performed_rpe: Option<f64>,
    pub set_type: SetType,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionSet {
    /// Effective load of the set: weight x reps, counted only when the set
    /// is completed and both performed values are present.
    pub fn effective_load(&self) -> Option<f64> {
        if !self.completed {
            return None;
        }
        match (self.performed_weight_kg, self.performed_reps) {
            (Some(weight), Some(reps)) => Some(weight * reps as f64),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordSet {
    pub prescribed_reps: Option<i32>,
    pub prescribed_weight_kg: Option<f64>,
    pub prescribed_rpe: Option<f64>,
    pub performed_reps: Option<i32>,
    pub performed_weight_kg: Option<f64>,
    pub performed_rpe: Option<f64>,
    #[serde(default)]
    pub set_type: SetType,
    #[serde(default)]
    pub completed: bool,
}

/// A session with its exercises and sets, as returned by the detail endpoint
#[derive(Debug, Serialize)]
pub struct SessionDetail {
    pub session: TrainingSession,
    pub exercises: Vec<SessionExerciseDetail>,
}

#[derive(Debug, Serialize)]
pub struct SessionExerciseDetail {
    pub exercise: SessionExercise,
    pub sets: Vec<SessionSet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(completed: bool, reps: Option<i32>, weight: Option<f64>) -> SessionSet {
        SessionSet {
            id: Uuid::new_v4(),
            session_exercise_id: Uuid::new_v4(),
            set_index: 0,
            prescribed_reps: None,
            prescribed_weight_kg: None,
            prescribed_rpe: None,
            performed_reps: reps,
            performed_weight_kg: weight,
            performed_rpe: None,
            set_type: SetType::Normal,
            completed,
            completed_at: completed.then(Utc::now),
        }
    }

    #[test]
    fn effective_load_requires_completion_and_both_values() {
        assert_eq!(set(true, Some(10), Some(50.0)).effective_load(), Some(500.0));
        assert_eq!(set(false, Some(10), Some(50.0)).effective_load(), None);
        assert_eq!(set(true, None, Some(50.0)).effective_load(), None);
        assert_eq!(set(true, Some(10), None).effective_load(), None);
    }
}
