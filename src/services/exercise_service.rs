use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateExercise, Exercise, MemberExercise, UpdateExercise};

const EXERCISE_COLUMNS: &str =
    "id, name, muscle_group, equipment, category, mechanics, created_at, updated_at";

const MEMBER_EXERCISE_COLUMNS: &str =
    "id, owner_id, name, muscle_group, equipment, category, mechanics, created_at, updated_at";

/// Catalog (global) and member (private) exercise management
#[derive(Debug, Clone)]
pub struct ExerciseService {
    db: PgPool,
}

impl ExerciseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_exercise(&self, data: CreateExercise) -> Result<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(&format!(
            "INSERT INTO exercises \
                 (id, name, muscle_group, equipment, category, mechanics, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING {EXERCISE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.muscle_group)
        .bind(data.equipment)
        .bind(data.category)
        .bind(data.mechanics)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(exercise)
    }

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        let exercises = sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises ORDER BY name"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(exercises)
    }

    pub async fn get_exercise(&self, exercise_id: Uuid) -> Result<Option<Exercise>> {
        let exercise = sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = $1"
        ))
        .bind(exercise_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(exercise)
    }

    pub async fn update_exercise(
        &self,
        exercise_id: Uuid,
        data: UpdateExercise,
    ) -> Result<Option<Exercise>> {
        let exercise = sqlx::query_as::<_, Exercise>(&format!(
            "UPDATE exercises \
             SET name = COALESCE($2, name), \
                 muscle_group = COALESCE($3, muscle_group), \
                 equipment = COALESCE($4, equipment), \
                 category = COALESCE($5, category), \
                 mechanics = COALESCE($6, mechanics), \
                 updated_at = $7 \
             WHERE id = $1 \
             RETURNING {EXERCISE_COLUMNS}"
        ))
        .bind(exercise_id)
        .bind(data.name)
        .bind(data.muscle_group)
        .bind(data.equipment)
        .bind(data.category)
        .bind(data.mechanics)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        Ok(exercise)
    }

    pub async fn delete_exercise(&self, exercise_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(exercise_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn create_member_exercise(
        &self,
        owner_id: Uuid,
        data: CreateExercise,
    ) -> Result<MemberExercise> {
        let exercise = sqlx::query_as::<_, MemberExercise>(&format!(
            "INSERT INTO member_exercises \
                 (id, owner_id, name, muscle_group, equipment, category, mechanics, \
                  created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             RETURNING {MEMBER_EXERCISE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&data.name)
        .bind(data.muscle_group)
        .bind(data.equipment)
        .bind(data.category)
        .bind(data.mechanics)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(exercise)
    }

    pub async fn list_member_exercises(&self, owner_id: Uuid) -> Result<Vec<MemberExercise>> {
        let exercises = sqlx::query_as::<_, MemberExercise>(&format!(
            "SELECT {MEMBER_EXERCISE_COLUMNS} FROM member_exercises \
             WHERE owner_id = $1 ORDER BY name"
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(exercises)
    }

    /// Owner-scoped delete: another user's id silently affects nothing
    pub async fn delete_member_exercise(&self, owner_id: Uuid, exercise_id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM member_exercises WHERE id = $1 AND owner_id = $2")
                .bind(exercise_id)
                .bind(owner_id)
                .execute(&self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
