use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Primary muscle group targeted by an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "muscle_group", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Core,
    FullBody,
}

impl MuscleGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Triceps => "triceps",
            MuscleGroup::Quads => "quads",
            MuscleGroup::Hamstrings => "hamstrings",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::Calves => "calves",
            MuscleGroup::Core => "core",
            MuscleGroup::FullBody => "full_body",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Quads => "Quads",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Core => "Core",
            MuscleGroup::FullBody => "Full body",
        }
    }

    pub const ALL: [MuscleGroup; 11] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Quads,
        MuscleGroup::Hamstrings,
        MuscleGroup::Glutes,
        MuscleGroup::Calves,
        MuscleGroup::Core,
        MuscleGroup::FullBody,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "equipment", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Cable,
    Bodyweight,
    Kettlebell,
    Band,
    Other,
}

impl Equipment {
    pub fn label(&self) -> &'static str {
        match self {
            Equipment::Barbell => "Barbell",
            Equipment::Dumbbell => "Dumbbell",
            Equipment::Machine => "Machine",
            Equipment::Cable => "Cable",
            Equipment::Bodyweight => "Bodyweight",
            Equipment::Kettlebell => "Kettlebell",
            Equipment::Band => "Band",
            Equipment::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "exercise_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Strength,
    Hypertrophy,
    Mobility,
    Conditioning,
}

impl ExerciseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "Strength",
            ExerciseCategory::Hypertrophy => "Hypertrophy",
            ExerciseCategory::Mobility => "Mobility",
            ExerciseCategory::Conditioning => "Conditioning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mechanics", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Mechanics {
    Compound,
    Isolation,
}

impl Mechanics {
    pub fn label(&self) -> &'static str {
        match self {
            Mechanics::Compound => "Compound",
            Mechanics::Isolation => "Isolation",
        }
    }
}

/// Global, admin-curated catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub category: ExerciseCategory,
    pub mechanics: Mechanics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-user private exercise entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MemberExercise {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub category: ExerciseCategory,
    pub mechanics: Mechanics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub category: ExerciseCategory,
    pub mechanics: Mechanics,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub muscle_group: Option<MuscleGroup>,
    pub equipment: Option<Equipment>,
    pub category: Option<ExerciseCategory>,
    pub mechanics: Option<Mechanics>,
}

/// Reference to either a catalog exercise or a user-private one.
///
/// Persisted as two nullable columns; this type makes the invalid
/// "both set" / "both null" states unrepresentable past the storage
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseRef {
    Catalog(Uuid),
    Custom(Uuid),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExerciseRefError {
    #[error("exercise reference has both catalog and custom ids set")]
    BothSet,
    #[error("exercise reference has neither catalog nor custom id set")]
    NeitherSet,
}

impl ExerciseRef {
    /// Decode the two nullable storage columns into a reference
    pub fn from_columns(
        exercise_id: Option<Uuid>,
        member_exercise_id: Option<Uuid>,
    ) -> Result<Self, ExerciseRefError> {
        match (exercise_id, member_exercise_id) {
            (Some(id), None) => Ok(ExerciseRef::Catalog(id)),
            (None, Some(id)) => Ok(ExerciseRef::Custom(id)),
            (Some(_), Some(_)) => Err(ExerciseRefError::BothSet),
            (None, None) => Err(ExerciseRefError::NeitherSet),
        }
    }

    /// Split back into the two storage columns
    pub fn into_columns(self) -> (Option<Uuid>, Option<Uuid>) {
        match self {
            ExerciseRef::Catalog(id) => (Some(id), None),
            ExerciseRef::Custom(id) => (None, Some(id)),
        }
    }

    pub fn catalog_id(&self) -> Option<Uuid> {
        match self {
            ExerciseRef::Catalog(id) => Some(*id),
            ExerciseRef::Custom(_) => None,
        }
    }

    pub fn custom_id(&self) -> Option<Uuid> {
        match self {
            ExerciseRef::Custom(id) => Some(*id),
            ExerciseRef::Catalog(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercise_ref_decoding() {
        let id = Uuid::new_v4();

        assert_eq!(
            ExerciseRef::from_columns(Some(id), None),
            Ok(ExerciseRef::Catalog(id))
        );
        assert_eq!(
            ExerciseRef::from_columns(None, Some(id)),
            Ok(ExerciseRef::Custom(id))
        );
        assert_eq!(
            ExerciseRef::from_columns(Some(id), Some(id)),
            Err(ExerciseRefError::BothSet)
        );
        assert_eq!(
            ExerciseRef::from_columns(None, None),
            Err(ExerciseRefError::NeitherSet)
        );
    }

    #[test]
    fn exercise_ref_column_round_trip() {
        let id = Uuid::new_v4();
        let (catalog, custom) = ExerciseRef::Custom(id).into_columns();
        assert_eq!(
            ExerciseRef::from_columns(catalog, custom),
            Ok(ExerciseRef::Custom(id))
        );
    }

    #[test]
    fn muscle_group_labels() {
        assert_eq!(MuscleGroup::Chest.as_str(), "chest");
        assert_eq!(MuscleGroup::FullBody.as_str(), "full_body");
        assert_eq!(MuscleGroup::FullBody.label(), "Full body");
        assert_eq!(MuscleGroup::ALL.len(), 11);
    }
}
