// Shared builders for integration tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use ironcoach::models::{
    CardioEntry, CardioType, DayTree, ExerciseRef, Invite, InviteRole, MuscleGroup, Program,
    ProgramDay, ProgramDayExercise, ProgramTree, ProgramVersion, SessionSet, SetType,
    TrainingSession, VersionTree,
};
use ironcoach::services::analysis_service::{CompletedExercise, CompletedSession};

pub fn completed_session(
    user_id: Uuid,
    completed_at: DateTime<Utc>,
    exercises: Vec<CompletedExercise>,
) -> CompletedSession {
    let started_at = completed_at - Duration::minutes(60);
    CompletedSession {
        session: TrainingSession {
            id: Uuid::new_v4(),
            user_id,
            title: "Training session".to_string(),
            scheduled_for: None,
            started_at,
            completed_at: Some(completed_at),
            notes: None,
            is_planned: false,
            created_at: started_at,
            updated_at: completed_at,
        },
        exercises,
    }
}

pub fn muscle_exercise(muscle_group: MuscleGroup, sets: Vec<SessionSet>) -> CompletedExercise {
    CompletedExercise { muscle_group, sets }
}

fn base_set() -> SessionSet {
    SessionSet {
        id: Uuid::new_v4(),
        session_exercise_id: Uuid::new_v4(),
        set_index: 0,
        prescribed_reps: None,
        prescribed_weight_kg: None,
        prescribed_rpe: None,
        performed_reps: None,
        performed_weight_kg: None,
        performed_rpe: None,
        set_type: SetType::Normal,
        completed: false,
        completed_at: None,
    }
}

/// A completed working set with performed reps and weight
pub fn performed_set(reps: i32, weight_kg: f64) -> SessionSet {
    SessionSet {
        performed_reps: Some(reps),
        performed_weight_kg: Some(weight_kg),
        completed: true,
        completed_at: Some(Utc::now()),
        ..base_set()
    }
}

/// A completed set that recorded neither weight nor reps
pub fn completed_set_without_metrics() -> SessionSet {
    SessionSet {
        completed: true,
        completed_at: Some(Utc::now()),
        ..base_set()
    }
}

/// A set that was logged but never completed
pub fn skipped_set(reps: i32, weight_kg: f64) -> SessionSet {
    SessionSet {
        performed_reps: Some(reps),
        performed_weight_kg: Some(weight_kg),
        ..base_set()
    }
}

pub fn cardio_entry(
    user_id: Uuid,
    cardio_type: CardioType,
    duration_seconds: i32,
    date: NaiveDate,
) -> CardioEntry {
    CardioEntry {
        id: Uuid::new_v4(),
        user_id,
        cardio_type,
        duration_seconds,
        distance_meters: None,
        date,
        notes: None,
        created_at: Utc::now(),
    }
}

pub fn invite(
    email: &str,
    role: InviteRole,
    expires_at: DateTime<Utc>,
    accepted_at: Option<DateTime<Utc>>,
) -> Invite {
    let now = Utc::now();
    Invite {
        id: Uuid::new_v4(),
        token: "test-token".to_string(),
        inviter_id: Uuid::new_v4(),
        email: email.to_string(),
        role,
        trainer_id: None,
        expires_at,
        accepted_at,
        created_at: now,
        updated_at: now,
    }
}

/// A template program with two active versions, each holding two ordered
/// days of ordered exercises
pub fn template_program_tree(owner_id: Uuid) -> ProgramTree {
    let now = Utc::now();
    let program_id = Uuid::new_v4();

    let program = Program {
        id: program_id,
        owner_id,
        name: "Push/Pull base block".to_string(),
        description: Some("Four-day split".to_string()),
        is_template: true,
        is_public: true,
        install_count: 7,
        source_program_id: None,
        created_at: now,
        updated_at: now,
    };

    let versions = (0..2)
        .map(|version_position| {
            let version_id = Uuid::new_v4();
            let days = (0..2)
                .map(|day_position| {
                    let day_id = Uuid::new_v4();
                    let exercises = (0..3)
                        .map(|exercise_position| ProgramDayExercise {
                            id: Uuid::new_v4(),
                            day_id,
                            exercise: ExerciseRef::Catalog(Uuid::new_v4()),
                            position: exercise_position,
                            target_sets: 3,
                            target_reps: 8,
                            target_rpe: Some(8.0),
                            notes: None,
                        })
                        .collect();

                    DayTree {
                        day: ProgramDay {
                            id: day_id,
                            version_id,
                            name: format!("Day {}", day_position + 1),
                            position: day_position,
                        },
                        exercises,
                    }
                })
                .collect();

            VersionTree {
                version: ProgramVersion {
                    id: version_id,
                    program_id,
                    name: format!("Week {}", version_position + 1),
                    position: version_position,
                    is_active: true,
                },
                days,
            }
        })
        .collect();

    ProgramTree { program, versions }
}
