use axum::{
    extract::{Path, Query, State},
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{
    AddSessionExercise, CreateTrainingSession, RecordSet, SessionDetail, SessionExercise,
    SessionSet, TrainingSession, UpdateTrainingSession,
};
use crate::services::{SessionError, SessionService};

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    /// Maximum number of items to return (default: 50, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

impl PaginationQuery {
    pub fn get_limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }

    pub fn get_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[derive(Clone)]
pub struct SessionsState {
    pub session_service: SessionService,
}

pub fn session_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = SessionsState {
        session_service: SessionService::new(db),
    };

    Router::new()
        .route("/", post(create_session).get(list_sessions))
        .route(
            "/:session_id",
            get(get_session).put(update_session).delete(delete_session),
        )
        .route("/:session_id/complete", post(complete_session))
        .route("/:session_id/exercises", post(add_exercise))
        .route("/exercises/:session_exercise_id/sets", post(record_set))
        .layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Start a session (planned or quick-start)
async fn create_session(
    State(state): State<SessionsState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateTrainingSession>,
) -> Result<Json<TrainingSession>, SessionError> {
    let created = state
        .session_service
        .create_session(session.user_id, request)
        .await?;
    Ok(Json(created))
}

async fn list_sessions(
    State(state): State<SessionsState>,
    Extension(session): Extension<UserSession>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<TrainingSession>>, SessionError> {
    let sessions = state
        .session_service
        .list_sessions(
            session.user_id,
            pagination.get_limit(),
            pagination.get_offset(),
        )
        .await?;
    Ok(Json(sessions))
}

async fn get_session(
    State(state): State<SessionsState>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionDetail>, SessionError> {
    let detail = state
        .session_service
        .get_session_detail(session.user_id, session_id)
        .await?;
    Ok(Json(detail))
}

async fn update_session(
    State(state): State<SessionsState>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<UpdateTrainingSession>,
) -> Result<Json<TrainingSession>, SessionError> {
    let updated = state
        .session_service
        .update_session(session.user_id, session_id, request)
        .await?;
    Ok(Json(updated))
}

/// Mark a session complete; it becomes immutable afterwards
async fn complete_session(
    State(state): State<SessionsState>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<TrainingSession>, SessionError> {
    let completed = state
        .session_service
        .complete_session(session.user_id, session_id)
        .await?;
    Ok(Json(completed))
}

async fn delete_session(
    State(state): State<SessionsState>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, SessionError> {
    state
        .session_service
        .delete_session(session.user_id, session_id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

async fn add_exercise(
    State(state): State<SessionsState>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AddSessionExercise>,
) -> Result<Json<SessionExercise>, SessionError> {
    let exercise = state
        .session_service
        .add_exercise(session.user_id, session_id, request)
        .await?;
    Ok(Json(exercise))
}

async fn record_set(
    State(state): State<SessionsState>,
    Extension(session): Extension<UserSession>,
    Path(session_exercise_id): Path<Uuid>,
    Json(request): Json<RecordSet>,
) -> Result<Json<SessionSet>, SessionError> {
    let set = state
        .session_service
        .record_set(session.user_id, session_exercise_id, request)
        .await?;
    Ok(Json(set))
}
