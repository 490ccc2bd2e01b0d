use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{MuscleGroup, WorkoutAnalysis, WorkoutSuggestion};
use crate::services::AnalysisService;

/// Lookback used when deriving the weekly suggestion
const SUGGESTION_WINDOW_DAYS: i64 = 28;

/// How many muscle groups a weekly suggestion highlights
const FOCUS_GROUP_COUNT: usize = 3;

const MIN_SESSIONS_PER_WEEK: i32 = 3;
const MAX_SESSIONS_PER_WEEK: i32 = 5;

/// The focus groups and cadence derived from an analysis report
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionPlan {
    pub focus_muscle_groups: Vec<MuscleGroup>,
    pub sessions_per_week: i32,
    pub notes: String,
}

/// Rank muscle groups by completed-set volume over the window and pick the
/// least-trained ones; nudge weekly cadence into the 3-5 range from the
/// observed session rate.
pub fn plan_suggestion(analysis: &WorkoutAnalysis) -> SuggestionPlan {
    let mut volumes: Vec<(MuscleGroup, i64)> = MuscleGroup::ALL
        .iter()
        .filter(|mg| **mg != MuscleGroup::FullBody)
        .map(|mg| {
            let sets = analysis
                .muscle_groups
                .volume
                .get(mg.as_str())
                .copied()
                .unwrap_or(0);
            (*mg, sets)
        })
        .collect();

    // stable sort keeps the canonical group order on equal volume
    volumes.sort_by_key(|(_, sets)| *sets);

    let focus_muscle_groups: Vec<MuscleGroup> = volumes
        .iter()
        .take(FOCUS_GROUP_COUNT)
        .map(|(mg, _)| *mg)
        .collect();

    let weeks = (analysis.window_days as f64 / 7.0).max(1.0);
    let observed_per_week =
        (analysis.session_summary.total_sessions as f64 / weeks).round() as i32;
    let sessions_per_week = observed_per_week.clamp(MIN_SESSIONS_PER_WEEK, MAX_SESSIONS_PER_WEEK);

    let focus_labels: Vec<&str> = focus_muscle_groups.iter().map(|mg| mg.label()).collect();
    let notes = format!(
        "Over the last {} days you completed {} sessions. \
         {} received the least work; plan {} sessions this week and give those groups priority.",
        analysis.window_days,
        analysis.session_summary.total_sessions,
        focus_labels.join(", "),
        sessions_per_week,
    );

    SuggestionPlan {
        focus_muscle_groups,
        sessions_per_week,
        notes,
    }
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

const SUGGESTION_COLUMNS: &str =
    "id, user_id, week_start, focus_muscle_groups, sessions_per_week, notes, created_at";

#[derive(Debug, Clone)]
pub struct SuggestionService {
    db: PgPool,
    analysis_service: AnalysisService,
}

impl SuggestionService {
    pub fn new(db: PgPool) -> Self {
        let analysis_service = AnalysisService::new(db.clone());
        Self {
            db,
            analysis_service,
        }
    }

    /// Generate (or regenerate) this week's suggestion for a user
    pub async fn generate_for_user(&self, user_id: Uuid) -> Result<WorkoutSuggestion> {
        let analysis = self
            .analysis_service
            .analyze(user_id, SUGGESTION_WINDOW_DAYS)
            .await?;

        let plan = plan_suggestion(&analysis);
        let week = week_start(Utc::now().date_naive());
        let focus: Vec<String> = plan
            .focus_muscle_groups
            .iter()
            .map(|mg| mg.as_str().to_string())
            .collect();

        let suggestion = sqlx::query_as::<_, WorkoutSuggestion>(&format!(
            "INSERT INTO workout_suggestions \
                 (id, user_id, week_start, focus_muscle_groups, sessions_per_week, notes, \
                  created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (user_id, week_start) DO UPDATE SET \
                 focus_muscle_groups = EXCLUDED.focus_muscle_groups, \
                 sessions_per_week = EXCLUDED.sessions_per_week, \
                 notes = EXCLUDED.notes \
             RETURNING {SUGGESTION_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(week)
        .bind(&focus)
        .bind(plan.sessions_per_week)
        .bind(&plan.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        info!(
            "Generated suggestion {} for user {} (week of {})",
            suggestion.id, user_id, week
        );
        Ok(suggestion)
    }

    pub async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<WorkoutSuggestion>> {
        let suggestion = sqlx::query_as::<_, WorkoutSuggestion>(&format!(
            "SELECT {SUGGESTION_COLUMNS} FROM workout_suggestions \
             WHERE user_id = $1 ORDER BY week_start DESC LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn week_start_is_monday() {
        // 2025-06-11 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        let monday = week_start(wednesday);
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert_eq!(monday, NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());

        // already Monday stays put
        assert_eq!(week_start(monday), monday);
    }
}
