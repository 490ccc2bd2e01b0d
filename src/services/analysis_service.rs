use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use sqlx::PgPool;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{
    CardioAnalysis, CardioEntry, ExerciseRef, MuscleGroup, MuscleGroupBreakdown, SessionExercise,
    SessionExerciseRow, SessionSet, SessionSummary, TrainingSession, VolumeMetrics,
    WeeklyPatterns, WorkoutAnalysis,
};

/// Trailing analysis window, inclusive on both ends
#[derive(Debug, Clone, Copy)]
pub struct AnalysisWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: i64,
}

impl AnalysisWindow {
    pub fn trailing(days: i64, now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(days),
            end: now,
            days,
        }
    }
}

/// A completed session with muscle-group-resolved exercises. The whole
/// window is loaded eagerly; window sizes are capped upstream (7-90 days).
#[derive(Debug, Clone)]
pub struct CompletedSession {
    pub session: TrainingSession,
    pub exercises: Vec<CompletedExercise>,
}

#[derive(Debug, Clone)]
pub struct CompletedExercise {
    pub muscle_group: MuscleGroup,
    pub sets: Vec<SessionSet>,
}

#[derive(Debug, Clone)]
pub struct AnalysisService {
    db: PgPool,
}

impl AnalysisService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Aggregate a user's completed sessions and cardio over the trailing
    /// window. A user with no matching data yields an all-zero report.
    pub async fn analyze(&self, user_id: Uuid, window_days: i64) -> Result<WorkoutAnalysis> {
        let now = Utc::now();
        let window = AnalysisWindow::trailing(window_days, now);

        let sessions = self.load_completed_sessions(user_id, &window).await?;
        let cardio = self.load_cardio_entries(user_id, &window).await?;

        info!(
            "Analyzed {} sessions and {} cardio entries for user {} over {} days",
            sessions.len(),
            cardio.len(),
            user_id,
            window_days
        );

        Ok(build_report(user_id, &sessions, &cardio, &window, now))
    }

    async fn load_completed_sessions(
        &self,
        user_id: Uuid,
        window: &AnalysisWindow,
    ) -> Result<Vec<CompletedSession>> {
        let sessions = sqlx::query_as::<_, TrainingSession>(
            "SELECT id, user_id, title, scheduled_for, started_at, completed_at, notes, \
                    is_planned, created_at, updated_at \
             FROM training_sessions \
             WHERE user_id = $1 AND completed_at IS NOT NULL \
               AND completed_at >= $2 AND completed_at <= $3 \
             ORDER BY completed_at",
        )
        .bind(user_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.db)
        .await?;

        if sessions.is_empty() {
            return Ok(Vec::new());
        }

        let session_ids: Vec<Uuid> = sessions.iter().map(|s| s.id).collect();

        let exercise_rows = sqlx::query_as::<_, SessionExerciseRow>(
            "SELECT id, session_id, exercise_id, member_exercise_id, position, notes \
             FROM session_exercises WHERE session_id = ANY($1) ORDER BY position",
        )
        .bind(&session_ids)
        .fetch_all(&self.db)
        .await?;

        let mut exercises = Vec::with_capacity(exercise_rows.len());
        for row in exercise_rows {
            match SessionExercise::try_from(row) {
                Ok(exercise) => exercises.push(exercise),
                // CHECK constraint makes this unreachable for new rows
                Err(err) => warn!("Skipping session exercise with {}", err),
            }
        }

        let exercise_ids: Vec<Uuid> = exercises.iter().map(|e| e.id).collect();
        let mut sets_by_exercise: HashMap<Uuid, Vec<SessionSet>> = HashMap::new();
        if !exercise_ids.is_empty() {
            let sets = sqlx::query_as::<_, SessionSet>(
                "SELECT id, session_exercise_id, set_index, prescribed_reps, \
                        prescribed_weight_kg, prescribed_rpe, performed_reps, \
                        performed_weight_kg, performed_rpe, set_type, completed, completed_at \
                 FROM session_sets WHERE session_exercise_id = ANY($1) ORDER BY set_index",
            )
            .bind(&exercise_ids)
            .fetch_all(&self.db)
            .await?;

            for set in sets {
                sets_by_exercise
                    .entry(set.session_exercise_id)
                    .or_default()
                    .push(set);
            }
        }

        let muscle_groups = self.resolve_muscle_groups(&exercises).await?;

        let mut by_session: HashMap<Uuid, Vec<CompletedExercise>> = HashMap::new();
        for exercise in exercises {
            let Some(&muscle_group) = muscle_groups.get(&exercise.id) else {
                warn!(
                    "Session exercise {} references a missing exercise; skipped",
                    exercise.id
                );
                continue;
            };

            by_session
                .entry(exercise.session_id)
                .or_default()
                .push(CompletedExercise {
                    muscle_group,
                    sets: sets_by_exercise.remove(&exercise.id).unwrap_or_default(),
                });
        }

        Ok(sessions
            .into_iter()
            .map(|session| {
                let exercises = by_session.remove(&session.id).unwrap_or_default();
                CompletedSession { session, exercises }
            })
            .collect())
    }

    /// Resolve each session exercise to the primary muscle group of its
    /// catalog or custom target
    async fn resolve_muscle_groups(
        &self,
        exercises: &[SessionExercise],
    ) -> Result<HashMap<Uuid, MuscleGroup>> {
        let catalog_ids: Vec<Uuid> = exercises
            .iter()
            .filter_map(|e| e.exercise.catalog_id())
            .collect();
        let custom_ids: Vec<Uuid> = exercises
            .iter()
            .filter_map(|e| e.exercise.custom_id())
            .collect();

        let mut catalog: HashMap<Uuid, MuscleGroup> = HashMap::new();
        if !catalog_ids.is_empty() {
            let rows = sqlx::query_as::<_, (Uuid, MuscleGroup)>(
                "SELECT id, muscle_group FROM exercises WHERE id = ANY($1)",
            )
            .bind(&catalog_ids)
            .fetch_all(&self.db)
            .await?;
            catalog.extend(rows);
        }

        let mut custom: HashMap<Uuid, MuscleGroup> = HashMap::new();
        if !custom_ids.is_empty() {
            let rows = sqlx::query_as::<_, (Uuid, MuscleGroup)>(
                "SELECT id, muscle_group FROM member_exercises WHERE id = ANY($1)",
            )
            .bind(&custom_ids)
            .fetch_all(&self.db)
            .await?;
            custom.extend(rows);
        }

        let mut resolved = HashMap::with_capacity(exercises.len());
        for exercise in exercises {
            let muscle_group = match exercise.exercise {
                ExerciseRef::Catalog(id) => catalog.get(&id),
                ExerciseRef::Custom(id) => custom.get(&id),
            };
            if let Some(&mg) = muscle_group {
                resolved.insert(exercise.id, mg);
            }
        }

        Ok(resolved)
    }

    async fn load_cardio_entries(
        &self,
        user_id: Uuid,
        window: &AnalysisWindow,
    ) -> Result<Vec<CardioEntry>> {
        let entries = sqlx::query_as::<_, CardioEntry>(
            "SELECT id, user_id, cardio_type, duration_seconds, distance_meters, date, notes, \
                    created_at \
             FROM cardio_entries \
             WHERE user_id = $1 AND date >= $2 AND date <= $3 \
             ORDER BY date",
        )
        .bind(user_id)
        .bind(window.start.date_naive())
        .bind(window.end.date_naive())
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }
}

/// Pure aggregation over the loaded window; separated from the loading
/// queries so it can be exercised directly with constructed data.
pub fn build_report(
    user_id: Uuid,
    sessions: &[CompletedSession],
    cardio: &[CardioEntry],
    window: &AnalysisWindow,
    generated_at: DateTime<Utc>,
) -> WorkoutAnalysis {
    WorkoutAnalysis {
        user_id,
        window_days: window.days,
        generated_at,
        session_summary: summarize_sessions(sessions),
        muscle_groups: muscle_group_breakdown(sessions),
        cardio_analysis: analyze_cardio(cardio),
        volume_metrics: volume_metrics(sessions),
        weekly_patterns: weekly_patterns(sessions),
    }
}

fn summarize_sessions(sessions: &[CompletedSession]) -> SessionSummary {
    let total_sessions = sessions.len() as i64;

    let mut total_duration_minutes = 0.0;
    for entry in sessions {
        if let Some(completed_at) = entry.session.completed_at {
            let span = completed_at - entry.session.started_at;
            if span > Duration::zero() {
                total_duration_minutes += span.num_seconds() as f64 / 60.0;
            }
        }
    }

    let average_duration_minutes = if total_sessions > 0 {
        total_duration_minutes / total_sessions as f64
    } else {
        0.0
    };

    SessionSummary {
        total_sessions,
        total_duration_minutes,
        average_duration_minutes,
    }
}

fn muscle_group_breakdown(sessions: &[CompletedSession]) -> MuscleGroupBreakdown {
    let mut frequency: BTreeMap<String, i64> = BTreeMap::new();
    let mut volume: BTreeMap<String, i64> = BTreeMap::new();

    for entry in sessions {
        let mut touched: BTreeSet<&'static str> = BTreeSet::new();

        for exercise in &entry.exercises {
            let completed_sets = exercise.sets.iter().filter(|s| s.completed).count() as i64;
            if completed_sets == 0 {
                continue;
            }

            touched.insert(exercise.muscle_group.as_str());
            *volume
                .entry(exercise.muscle_group.as_str().to_string())
                .or_insert(0) += completed_sets;
        }

        for muscle_group in touched {
            *frequency.entry(muscle_group.to_string()).or_insert(0) += 1;
        }
    }

    MuscleGroupBreakdown { frequency, volume }
}

fn analyze_cardio(cardio: &[CardioEntry]) -> CardioAnalysis {
    let mut by_type: BTreeMap<String, i64> = BTreeMap::new();
    let mut total_seconds: i64 = 0;

    for entry in cardio {
        *by_type
            .entry(entry.cardio_type.as_str().to_string())
            .or_insert(0) += 1;
        total_seconds += entry.duration_seconds as i64;
    }

    CardioAnalysis {
        total_sessions: cardio.len() as i64,
        by_type,
        total_duration_minutes: total_seconds as f64 / 60.0,
    }
}

fn volume_metrics(sessions: &[CompletedSession]) -> VolumeMetrics {
    let mut total_sets: i64 = 0;
    let mut total_volume = 0.0;
    let mut reps_sum: i64 = 0;
    let mut reps_count: i64 = 0;

    for entry in sessions {
        for exercise in &entry.exercises {
            for set in &exercise.sets {
                if !set.completed {
                    continue;
                }

                total_sets += 1;

                if let Some(load) = set.effective_load() {
                    total_volume += load;
                }

                if let Some(reps) = set.performed_reps {
                    reps_sum += reps as i64;
                    reps_count += 1;
                }
            }
        }
    }

    let average_reps_per_set = if reps_count > 0 {
        reps_sum as f64 / reps_count as f64
    } else {
        0.0
    };

    VolumeMetrics {
        total_sets,
        total_volume,
        average_reps_per_set,
    }
}

fn weekly_patterns(sessions: &[CompletedSession]) -> WeeklyPatterns {
    let mut training_days: BTreeSet<String> = BTreeSet::new();
    let mut day_counts: BTreeMap<String, i64> = BTreeMap::new();

    for entry in sessions {
        if let Some(completed_at) = entry.session.completed_at {
            let day = weekday_name(completed_at.weekday());
            training_days.insert(day.to_string());
            *day_counts.entry(day.to_string()).or_insert(0) += 1;
        }
    }

    WeeklyPatterns {
        training_days,
        day_counts,
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_names_are_full_english() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }

    #[test]
    fn empty_window_summary_is_zeroed() {
        let summary = summarize_sessions(&[]);
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.average_duration_minutes, 0.0);
    }
}
