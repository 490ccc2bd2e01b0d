use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{
    CreateProgram, Program, ProgramDay, ProgramDayExercise, ProgramTree, ProgramVersion,
    UpdateProgram,
};
use crate::services::program_service::{
    AddProgramDayExercise, CreateProgramDay, CreateProgramVersion,
};
use crate::services::{ProgramError, ProgramService};

#[derive(Clone)]
pub struct ProgramsState {
    pub program_service: ProgramService,
}

pub fn program_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = ProgramsState {
        program_service: ProgramService::new(db),
    };

    Router::new()
        .route("/", post(create_program).get(list_programs))
        .route(
            "/:program_id",
            get(get_program).put(update_program).delete(delete_program),
        )
        .route("/:program_id/clone", post(clone_program))
        .route("/:program_id/versions", post(add_version))
        .route("/versions/:version_id/days", post(add_day))
        .route("/days/:day_id/exercises", post(add_day_exercise))
        .layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

async fn create_program(
    State(state): State<ProgramsState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateProgram>,
) -> Result<Json<Program>, ProgramError> {
    let program = state
        .program_service
        .create_program(session.user_id, request)
        .await?;
    Ok(Json(program))
}

async fn list_programs(
    State(state): State<ProgramsState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<Program>>, ProgramError> {
    let programs = state.program_service.list_programs(session.user_id).await?;
    Ok(Json(programs))
}

/// Full active structure, in position order
async fn get_program(
    State(state): State<ProgramsState>,
    Extension(session): Extension<UserSession>,
    Path(program_id): Path<Uuid>,
) -> Result<Json<ProgramTree>, ProgramError> {
    let tree = state
        .program_service
        .get_program_tree(session.user_id, program_id)
        .await?;
    Ok(Json(tree))
}

async fn update_program(
    State(state): State<ProgramsState>,
    Extension(session): Extension<UserSession>,
    Path(program_id): Path<Uuid>,
    Json(request): Json<UpdateProgram>,
) -> Result<Json<Program>, ProgramError> {
    let program = state
        .program_service
        .update_program(session.user_id, program_id, request)
        .await?;
    Ok(Json(program))
}

async fn delete_program(
    State(state): State<ProgramsState>,
    Extension(session): Extension<UserSession>,
    Path(program_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ProgramError> {
    state
        .program_service
        .delete_program(session.user_id, program_id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Deep-copy a program into the caller's library
async fn clone_program(
    State(state): State<ProgramsState>,
    Extension(session): Extension<UserSession>,
    Path(program_id): Path<Uuid>,
) -> Result<Json<Program>, ProgramError> {
    let clone = state
        .program_service
        .clone_program(session.user_id, program_id)
        .await?;
    Ok(Json(clone))
}

async fn add_version(
    State(state): State<ProgramsState>,
    Extension(session): Extension<UserSession>,
    Path(program_id): Path<Uuid>,
    Json(request): Json<CreateProgramVersion>,
) -> Result<Json<ProgramVersion>, ProgramError> {
    let version = state
        .program_service
        .add_version(session.user_id, program_id, request)
        .await?;
    Ok(Json(version))
}

async fn add_day(
    State(state): State<ProgramsState>,
    Extension(session): Extension<UserSession>,
    Path(version_id): Path<Uuid>,
    Json(request): Json<CreateProgramDay>,
) -> Result<Json<ProgramDay>, ProgramError> {
    let day = state
        .program_service
        .add_day(session.user_id, version_id, request)
        .await?;
    Ok(Json(day))
}

async fn add_day_exercise(
    State(state): State<ProgramsState>,
    Extension(session): Extension<UserSession>,
    Path(day_id): Path<Uuid>,
    Json(request): Json<AddProgramDayExercise>,
) -> Result<Json<ProgramDayExercise>, ProgramError> {
    let exercise = state
        .program_service
        .add_day_exercise(session.user_id, day_id, request)
        .await?;
    Ok(Json(exercise))
}
