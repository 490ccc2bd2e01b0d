use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    admin_only_middleware, jwt_auth_middleware, AuthService, UserSession,
};
use crate::models::{CreateExercise, Exercise, MemberExercise, UpdateExercise};
use crate::services::ExerciseService;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_service: ExerciseService,
}

/// Global catalog: readable by any authenticated user, mutable by admins
pub fn exercise_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = ExercisesState {
        exercise_service: ExerciseService::new(db),
    };

    let admin_routes = Router::new()
        .route("/", post(create_exercise))
        .route("/:exercise_id", axum::routing::put(update_exercise).delete(delete_exercise))
        .route_layer(middleware::from_fn(admin_only_middleware));

    Router::new()
        .route("/", get(list_exercises))
        .route("/:exercise_id", get(get_exercise))
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Per-user private exercises
pub fn member_exercise_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = ExercisesState {
        exercise_service: ExerciseService::new(db),
    };

    Router::new()
        .route("/", post(create_member_exercise).get(list_member_exercises))
        .route("/:exercise_id", delete(delete_member_exercise))
        .layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

async fn list_exercises(
    State(state): State<ExercisesState>,
) -> Result<Json<Vec<Exercise>>, StatusCode> {
    let exercises = state
        .exercise_service
        .list_exercises()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(exercises))
}

async fn get_exercise(
    State(state): State<ExercisesState>,
    Path(exercise_id): Path<Uuid>,
) -> Result<Json<Exercise>, StatusCode> {
    let exercise = state
        .exercise_service
        .get_exercise(exercise_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(exercise))
}

async fn create_exercise(
    State(state): State<ExercisesState>,
    Json(request): Json<CreateExercise>,
) -> Result<Json<Exercise>, StatusCode> {
    if request.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let exercise = state
        .exercise_service
        .create_exercise(request)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(exercise))
}

async fn update_exercise(
    State(state): State<ExercisesState>,
    Path(exercise_id): Path<Uuid>,
    Json(request): Json<UpdateExercise>,
) -> Result<Json<Exercise>, StatusCode> {
    let exercise = state
        .exercise_service
        .update_exercise(exercise_id, request)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(exercise))
}

async fn delete_exercise(
    State(state): State<ExercisesState>,
    Path(exercise_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let deleted = state
        .exercise_service
        .delete_exercise(exercise_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

async fn create_member_exercise(
    State(state): State<ExercisesState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateExercise>,
) -> Result<Json<MemberExercise>, StatusCode> {
    if request.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let exercise = state
        .exercise_service
        .create_member_exercise(session.user_id, request)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(exercise))
}

async fn list_member_exercises(
    State(state): State<ExercisesState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<MemberExercise>>, StatusCode> {
    let exercises = state
        .exercise_service
        .list_member_exercises(session.user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(exercises))
}

async fn delete_member_exercise(
    State(state): State<ExercisesState>,
    Extension(session): Extension<UserSession>,
    Path(exercise_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let deleted = state
        .exercise_service
        .delete_member_exercise(session.user_id, exercise_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
