use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    CreateProgram, DayTree, ExerciseRef, ExerciseRefError, Program, ProgramDay,
    ProgramDayExercise, ProgramDayExerciseRow, ProgramTree, ProgramVersion, UpdateProgram,
    VersionTree,
};

#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("Program not found")]
    NotFound,
    #[error("Program belongs to another user")]
    Forbidden,
    #[error("Corrupt exercise reference: {0}")]
    ExerciseRef(#[from] ExerciseRefError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ProgramError {
    fn into_response(self) -> Response {
        let status = match self {
            ProgramError::NotFound => StatusCode::NOT_FOUND,
            ProgramError::Forbidden => StatusCode::FORBIDDEN,
            ProgramError::ExerciseRef(_) | ProgramError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProgramVersion {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProgramDay {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddProgramDayExercise {
    pub exercise: ExerciseRef,
    pub target_sets: i32,
    pub target_reps: i32,
    pub target_rpe: Option<f64>,
    pub notes: Option<String>,
}

const PROGRAM_COLUMNS: &str = "id, owner_id, name, description, is_template, is_public, \
     install_count, source_program_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ProgramService {
    db: PgPool,
}

impl ProgramService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_program(
        &self,
        owner_id: Uuid,
        data: CreateProgram,
    ) -> Result<Program, ProgramError> {
        let program = sqlx::query_as::<_, Program>(&format!(
            "INSERT INTO programs \
                 (id, owner_id, name, description, is_template, is_public, install_count, \
                  created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $7) \
             RETURNING {PROGRAM_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.is_template)
        .bind(data.is_public)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(program)
    }

    pub async fn list_programs(&self, owner_id: Uuid) -> Result<Vec<Program>, ProgramError> {
        let programs = sqlx::query_as::<_, Program>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE owner_id = $1 ORDER BY created_at"
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(programs)
    }

    pub async fn update_program(
        &self,
        owner_id: Uuid,
        program_id: Uuid,
        data: UpdateProgram,
    ) -> Result<Program, ProgramError> {
        self.get_owned_program(owner_id, program_id).await?;

        let program = sqlx::query_as::<_, Program>(&format!(
            "UPDATE programs \
             SET name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 is_template = COALESCE($4, is_template), \
                 is_public = COALESCE($5, is_public), \
                 updated_at = $6 \
             WHERE id = $1 \
             RETURNING {PROGRAM_COLUMNS}"
        ))
        .bind(program_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.is_template)
        .bind(data.is_public)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(program)
    }

    pub async fn delete_program(
        &self,
        owner_id: Uuid,
        program_id: Uuid,
    ) -> Result<(), ProgramError> {
        self.get_owned_program(owner_id, program_id).await?;

        sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(program_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    pub async fn add_version(
        &self,
        owner_id: Uuid,
        program_id: Uuid,
        data: CreateProgramVersion,
    ) -> Result<ProgramVersion, ProgramError> {
        self.get_owned_program(owner_id, program_id).await?;

        let position = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM program_versions WHERE program_id = $1",
        )
        .bind(program_id)
        .fetch_one(&self.db)
        .await?;

        let version = sqlx::query_as::<_, ProgramVersion>(
            "INSERT INTO program_versions (id, program_id, name, position, is_active) \
             VALUES ($1, $2, $3, $4, TRUE) \
             RETURNING id, program_id, name, position, is_active",
        )
        .bind(Uuid::new_v4())
        .bind(program_id)
        .bind(&data.name)
        .bind(position)
        .fetch_one(&self.db)
        .await?;

        Ok(version)
    }

    pub async fn add_day(
        &self,
        owner_id: Uuid,
        version_id: Uuid,
        data: CreateProgramDay,
    ) -> Result<ProgramDay, ProgramError> {
        let program_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT program_id FROM program_versions WHERE id = $1",
        )
        .bind(version_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ProgramError::NotFound)?;

        self.get_owned_program(owner_id, program_id).await?;

        let position = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM program_days WHERE version_id = $1",
        )
        .bind(version_id)
        .fetch_one(&self.db)
        .await?;

        let day = sqlx::query_as::<_, ProgramDay>(
            "INSERT INTO program_days (id, version_id, name, position) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, version_id, name, position",
        )
        .bind(Uuid::new_v4())
        .bind(version_id)
        .bind(&data.name)
        .bind(position)
        .fetch_one(&self.db)
        .await?;

        Ok(day)
    }

    pub async fn add_day_exercise(
        &self,
        owner_id: Uuid,
        day_id: Uuid,
        data: AddProgramDayExercise,
    ) -> Result<ProgramDayExercise, ProgramError> {
        let program_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT v.program_id FROM program_days d \
             JOIN program_versions v ON v.id = d.version_id WHERE d.id = $1",
        )
        .bind(day_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ProgramError::NotFound)?;

        self.get_owned_program(owner_id, program_id).await?;

        let position = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM program_day_exercises WHERE day_id = $1",
        )
        .bind(day_id)
        .fetch_one(&self.db)
        .await?;

        let (exercise_id, member_exercise_id) = data.exercise.into_columns();

        let row = sqlx::query_as::<_, ProgramDayExerciseRow>(
            "INSERT INTO program_day_exercises \
                 (id, day_id, exercise_id, member_exercise_id, position, target_sets, \
                  target_reps, target_rpe, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id, day_id, exercise_id, member_exercise_id, position, target_sets, \
                       target_reps, target_rpe, notes",
        )
        .bind(Uuid::new_v4())
        .bind(day_id)
        .bind(exercise_id)
        .bind(member_exercise_id)
        .bind(position)
        .bind(data.target_sets)
        .bind(data.target_reps)
        .bind(data.target_rpe)
        .bind(&data.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(ProgramDayExercise::try_from(row)?)
    }

    /// Load a program's active structure in position order
    pub async fn get_program_tree(
        &self,
        caller_id: Uuid,
        program_id: Uuid,
    ) -> Result<ProgramTree, ProgramError> {
        let program = self.get_readable_program(caller_id, program_id).await?;
        self.load_tree(program).await
    }

    /// Deep-copy a program's active structure for a new owner.
    ///
    /// The clone starts private with a zero install count and a
    /// back-reference to the source; a template source has its install
    /// counter incremented. Runs in one transaction so a mid-copy failure
    /// leaves no partial clone.
    pub async fn clone_program(
        &self,
        caller_id: Uuid,
        source_id: Uuid,
    ) -> Result<Program, ProgramError> {
        let source_program = self.get_readable_program(caller_id, source_id).await?;
        let source_is_template = source_program.is_template;
        let source = self.load_tree(source_program).await?;

        let planned = plan_clone(&source, caller_id, Utc::now());

        let mut tx = self.db.begin().await?;

        let program = sqlx::query_as::<_, Program>(&format!(
            "INSERT INTO programs \
                 (id, owner_id, name, description, is_template, is_public, install_count, \
                  source_program_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {PROGRAM_COLUMNS}"
        ))
        .bind(planned.program.id)
        .bind(planned.program.owner_id)
        .bind(&planned.program.name)
        .bind(&planned.program.description)
        .bind(planned.program.is_template)
        .bind(planned.program.is_public)
        .bind(planned.program.install_count)
        .bind(planned.program.source_program_id)
        .bind(planned.program.created_at)
        .bind(planned.program.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        for version in &planned.versions {
            sqlx::query(
                "INSERT INTO program_versions (id, program_id, name, position, is_active) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(version.version.id)
            .bind(version.version.program_id)
            .bind(&version.version.name)
            .bind(version.version.position)
            .bind(version.version.is_active)
            .execute(&mut *tx)
            .await?;

            for day in &version.days {
                sqlx::query(
                    "INSERT INTO program_days (id, version_id, name, position) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(day.day.id)
                .bind(day.day.version_id)
                .bind(&day.day.name)
                .bind(day.day.position)
                .execute(&mut *tx)
                .await?;

                for exercise in &day.exercises {
                    let (exercise_id, member_exercise_id) = exercise.exercise.into_columns();
                    sqlx::query(
                        "INSERT INTO program_day_exercises \
                             (id, day_id, exercise_id, member_exercise_id, position, \
                              target_sets, target_reps, target_rpe, notes) \
                         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                    )
                    .bind(exercise.id)
                    .bind(exercise.day_id)
                    .bind(exercise_id)
                    .bind(member_exercise_id)
                    .bind(exercise.position)
                    .bind(exercise.target_sets)
                    .bind(exercise.target_reps)
                    .bind(exercise.target_rpe)
                    .bind(&exercise.notes)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        if source_is_template {
            sqlx::query("UPDATE programs SET install_count = install_count + 1 WHERE id = $1")
                .bind(source_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            "Cloned program {} into {} for user {}",
            source_id, program.id, caller_id
        );
        Ok(program)
    }

    async fn load_tree(&self, program: Program) -> Result<ProgramTree, ProgramError> {
        let versions = sqlx::query_as::<_, ProgramVersion>(
            "SELECT id, program_id, name, position, is_active \
             FROM program_versions WHERE program_id = $1 AND is_active ORDER BY position",
        )
        .bind(program.id)
        .fetch_all(&self.db)
        .await?;

        let mut version_trees = Vec::with_capacity(versions.len());
        for version in versions {
            let days = sqlx::query_as::<_, ProgramDay>(
                "SELECT id, version_id, name, position \
                 FROM program_days WHERE version_id = $1 ORDER BY position",
            )
            .bind(version.id)
            .fetch_all(&self.db)
            .await?;

            let mut day_trees = Vec::with_capacity(days.len());
            for day in days {
                let rows = sqlx::query_as::<_, ProgramDayExerciseRow>(
                    "SELECT id, day_id, exercise_id, member_exercise_id, position, target_sets, \
                            target_reps, target_rpe, notes \
                     FROM program_day_exercises WHERE day_id = $1 ORDER BY position",
                )
                .bind(day.id)
                .fetch_all(&self.db)
                .await?;

                let exercises = rows
                    .into_iter()
                    .map(ProgramDayExercise::try_from)
                    .collect::<Result<Vec<_>, _>>()?;

                day_trees.push(DayTree { day, exercises });
            }

            version_trees.push(VersionTree {
                version,
                days: day_trees,
            });
        }

        Ok(ProgramTree {
            program,
            versions: version_trees,
        })
    }

    async fn get_owned_program(
        &self,
        owner_id: Uuid,
        program_id: Uuid,
    ) -> Result<Program, ProgramError> {
        let program = self.get_program(program_id).await?;
        if program.owner_id != owner_id {
            return Err(ProgramError::Forbidden);
        }
        Ok(program)
    }

    /// Owners can read their own programs; templates and public programs
    /// are readable (and clonable) by anyone
    async fn get_readable_program(
        &self,
        caller_id: Uuid,
        program_id: Uuid,
    ) -> Result<Program, ProgramError> {
        let program = self.get_program(program_id).await?;
        if program.owner_id != caller_id && !program.is_public && !program.is_template {
            return Err(ProgramError::Forbidden);
        }
        Ok(program)
    }

    async fn get_program(&self, program_id: Uuid) -> Result<Program, ProgramError> {
        let program = sqlx::query_as::<_, Program>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = $1"
        ))
        .bind(program_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ProgramError::NotFound)?;

        Ok(program)
    }
}

/// Plan the clone of a loaded source tree: fresh ids, re-parented to the
/// new owner, ordering preserved, visibility and install count reset.
pub fn plan_clone(source: &ProgramTree, new_owner: Uuid, now: DateTime<Utc>) -> ProgramTree {
    let program_id = Uuid::new_v4();

    let program = Program {
        id: program_id,
        owner_id: new_owner,
        name: source.program.name.clone(),
        description: source.program.description.clone(),
        is_template: false,
        is_public: false,
        install_count: 0,
        source_program_id: Some(source.program.id),
        created_at: now,
        updated_at: now,
    };

    let versions = source
        .versions
        .iter()
        .map(|version_tree| {
            let version_id = Uuid::new_v4();
            let days = version_tree
                .days
                .iter()
                .map(|day_tree| {
                    let day_id = Uuid::new_v4();
                    let exercises = day_tree
                        .exercises
                        .iter()
                        .map(|exercise| ProgramDayExercise {
                            id: Uuid::new_v4(),
                            day_id,
                            ..exercise.clone()
                        })
                        .collect();

                    DayTree {
                        day: ProgramDay {
                            id: day_id,
                            version_id,
                            name: day_tree.day.name.clone(),
                            position: day_tree.day.position,
                        },
                        exercises,
                    }
                })
                .collect();

            VersionTree {
                version: ProgramVersion {
                    id: version_id,
                    program_id,
                    name: version_tree.version.name.clone(),
                    position: version_tree.version.position,
                    is_active: version_tree.version.is_active,
                },
                days,
            }
        })
        .collect();

    ProgramTree { program, versions }
}
