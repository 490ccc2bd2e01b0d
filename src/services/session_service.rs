use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    AddSessionExercise, CreateTrainingSession, ExerciseRefError, RecordSet, SessionDetail,
    SessionExercise, SessionExerciseDetail, SessionExerciseRow, SessionSet, TrainingSession,
    UpdateTrainingSession,
};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Training session not found")]
    NotFound,
    #[error("Training session belongs to another user")]
    Forbidden,
    #[error("Training session is already completed")]
    AlreadyCompleted,
    #[error("Corrupt exercise reference: {0}")]
    ExerciseRef(#[from] ExerciseRefError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = match self {
            SessionError::NotFound => StatusCode::NOT_FOUND,
            SessionError::Forbidden => StatusCode::FORBIDDEN,
            SessionError::AlreadyCompleted => StatusCode::CONFLICT,
            SessionError::ExerciseRef(_) | SessionError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

const SESSION_COLUMNS: &str = "id, user_id, title, scheduled_for, started_at, completed_at, \
     notes, is_planned, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct SessionService {
    db: PgPool,
}

impl SessionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Start a session, planned or quick-start
    pub async fn create_session(
        &self,
        user_id: Uuid,
        data: CreateTrainingSession,
    ) -> Result<TrainingSession, SessionError> {
        let now = Utc::now();

        let session = sqlx::query_as::<_, TrainingSession>(&format!(
            "INSERT INTO training_sessions \
                 (id, user_id, title, scheduled_for, started_at, notes, is_planned, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&data.title)
        .bind(data.scheduled_for)
        .bind(now)
        .bind(&data.notes)
        .bind(data.is_planned)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        info!("User {} started session {}", user_id, session.id);
        Ok(session)
    }

    pub async fn list_sessions(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TrainingSession>, SessionError> {
        let sessions = sqlx::query_as::<_, TrainingSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM training_sessions \
             WHERE user_id = $1 ORDER BY started_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(sessions)
    }

    /// Load a session with its exercises and sets, in position order
    pub async fn get_session_detail(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<SessionDetail, SessionError> {
        let session = self.get_owned_session(user_id, session_id).await?;

        let exercise_rows = sqlx::query_as::<_, SessionExerciseRow>(
            "SELECT id, session_id, exercise_id, member_exercise_id, position, notes \
             FROM session_exercises WHERE session_id = $1 ORDER BY position",
        )
        .bind(session_id)
        .fetch_all(&self.db)
        .await?;

        let mut exercises = Vec::with_capacity(exercise_rows.len());
        for row in exercise_rows {
            let exercise = SessionExercise::try_from(row)?;
            let sets = sqlx::query_as::<_, SessionSet>(
                "SELECT id, session_exercise_id, set_index, prescribed_reps, prescribed_weight_kg, \
                        prescribed_rpe, performed_reps, performed_weight_kg, performed_rpe, \
                        set_type, completed, completed_at \
                 FROM session_sets WHERE session_exercise_id = $1 ORDER BY set_index",
            )
            .bind(exercise.id)
            .fetch_all(&self.db)
            .await?;

            exercises.push(SessionExerciseDetail { exercise, sets });
        }

        Ok(SessionDetail { session, exercises })
    }

    /// Update title/schedule/notes. Completed sessions are immutable.
    pub async fn update_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        data: UpdateTrainingSession,
    ) -> Result<TrainingSession, SessionError> {
        self.get_owned_open_session(user_id, session_id).await?;

        let session = sqlx::query_as::<_, TrainingSession>(&format!(
            "UPDATE training_sessions \
             SET title = COALESCE($2, title), \
                 scheduled_for = COALESCE($3, scheduled_for), \
                 notes = COALESCE($4, notes), \
                 updated_at = $5 \
             WHERE id = $1 \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(session_id)
        .bind(data.title)
        .bind(data.scheduled_for)
        .bind(data.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(session)
    }

    /// Mark a session complete. Completing twice is rejected.
    pub async fn complete_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<TrainingSession, SessionError> {
        self.get_owned_open_session(user_id, session_id).await?;

        let now = Utc::now();
        let session = sqlx::query_as::<_, TrainingSession>(&format!(
            "UPDATE training_sessions SET completed_at = $2, updated_at = $2 \
             WHERE id = $1 AND completed_at IS NULL \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(session_id)
        .bind(now)
        .fetch_optional(&self.db)
        .await?
        .ok_or(SessionError::AlreadyCompleted)?;

        info!("User {} completed session {}", user_id, session_id);
        Ok(session)
    }

    pub async fn delete_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<(), SessionError> {
        self.get_owned_session(user_id, session_id).await?;

        sqlx::query("DELETE FROM training_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Append an exercise to an open session
    pub async fn add_exercise(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        data: AddSessionExercise,
    ) -> Result<SessionExercise, SessionError> {
        self.get_owned_open_session(user_id, session_id).await?;

        let position = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM session_exercises WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_one(&self.db)
        .await?;

        let (exercise_id, member_exercise_id) = data.exercise.into_columns();

        let row = sqlx::query_as::<_, SessionExerciseRow>(
            "INSERT INTO session_exercises \
                 (id, session_id, exercise_id, member_exercise_id, position, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, session_id, exercise_id, member_exercise_id, position, notes",
        )
        .bind(Uuid::new_v4())
        .bind(session_id)
        .bind(exercise_id)
        .bind(member_exercise_id)
        .bind(position)
        .bind(&data.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(SessionExercise::try_from(row)?)
    }

    /// Record a set under a session exercise
    pub async fn record_set(
        &self,
        user_id: Uuid,
        session_exercise_id: Uuid,
        data: RecordSet,
    ) -> Result<SessionSet, SessionError> {
        let session_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT session_id FROM session_exercises WHERE id = $1",
        )
        .bind(session_exercise_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(SessionError::NotFound)?;

        self.get_owned_open_session(user_id, session_id).await?;

        let set_index = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(set_index) + 1, 0) FROM session_sets \
             WHERE session_exercise_id = $1",
        )
        .bind(session_exercise_id)
        .fetch_one(&self.db)
        .await?;

        let completed_at = data.completed.then(Utc::now);

        let set = sqlx::query_as::<_, SessionSet>(
            "INSERT INTO session_sets \
                 (id, session_exercise_id, set_index, prescribed_reps, prescribed_weight_kg, \
                  prescribed_rpe, performed_reps, performed_weight_kg, performed_rpe, \
                  set_type, completed, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING id, session_exercise_id, set_index, prescribed_reps, prescribed_weight_kg, \
                       prescribed_rpe, performed_reps, performed_weight_kg, performed_rpe, \
                       set_type, completed, completed_at",
        )
        .bind(Uuid::new_v4())
        .bind(session_exercise_id)
        .bind(set_index)
        .bind(data.prescribed_reps)
        .bind(data.prescribed_weight_kg)
        .bind(data.prescribed_rpe)
        .bind(data.performed_reps)
        .bind(data.performed_weight_kg)
        .bind(data.performed_rpe)
        .bind(data.set_type)
        .bind(data.completed)
        .bind(completed_at)
        .fetch_one(&self.db)
        .await?;

        Ok(set)
    }

    async fn get_owned_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<TrainingSession, SessionError> {
        let session = sqlx::query_as::<_, TrainingSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM training_sessions WHERE id = $1"
        ))
        .bind(session_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(SessionError::NotFound)?;

        if session.user_id != user_id {
            return Err(SessionError::Forbidden);
        }

        Ok(session)
    }

    async fn get_owned_open_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<TrainingSession, SessionError> {
        let session = self.get_owned_session(user_id, session_id).await?;
        if session.is_completed() {
            return Err(SessionError::AlreadyCompleted);
        }
        Ok(session)
    }
}
