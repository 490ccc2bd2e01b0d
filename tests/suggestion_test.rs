use chrono::Utc;
use std::collections::BTreeMap;
use uuid::Uuid;

use ironcoach::models::{
    CardioAnalysis, MuscleGroup, MuscleGroupBreakdown, SessionSummary, VolumeMetrics,
    WeeklyPatterns, WorkoutAnalysis,
};
use ironcoach::services::suggestion_service::plan_suggestion;

fn analysis_with(volume: BTreeMap<String, i64>, total_sessions: i64) -> WorkoutAnalysis {
    WorkoutAnalysis {
        user_id: Uuid::new_v4(),
        window_days: 28,
        generated_at: Utc::now(),
        session_summary: SessionSummary {
            total_sessions,
            total_duration_minutes: total_sessions as f64 * 60.0,
            average_duration_minutes: 60.0,
        },
        muscle_groups: MuscleGroupBreakdown {
            frequency: BTreeMap::new(),
            volume,
        },
        cardio_analysis: CardioAnalysis::default(),
        volume_metrics: VolumeMetrics::default(),
        weekly_patterns: WeeklyPatterns::default(),
    }
}

#[test]
fn focus_goes_to_the_least_trained_groups() {
    let mut volume = BTreeMap::new();
    volume.insert("chest".to_string(), 24);
    volume.insert("back".to_string(), 20);
    volume.insert("quads".to_string(), 18);
    // everything else saw zero sets

    let plan = plan_suggestion(&analysis_with(volume, 12));

    assert_eq!(plan.focus_muscle_groups.len(), 3);
    assert!(!plan.focus_muscle_groups.contains(&MuscleGroup::Chest));
    assert!(!plan.focus_muscle_groups.contains(&MuscleGroup::Back));
    assert!(!plan.focus_muscle_groups.contains(&MuscleGroup::Quads));
    // zero-volume groups surface in canonical order
    assert_eq!(
        plan.focus_muscle_groups,
        vec![
            MuscleGroup::Shoulders,
            MuscleGroup::Biceps,
            MuscleGroup::Triceps
        ]
    );
}

#[test]
fn cadence_is_clamped_into_the_three_to_five_range() {
    // barely training: 1 session over 4 weeks rounds to 0, clamped up to 3
    let sparse = plan_suggestion(&analysis_with(BTreeMap::new(), 1));
    assert_eq!(sparse.sessions_per_week, 3);

    // training daily: 28 sessions over 4 weeks rounds to 7, clamped to 5
    let heavy = plan_suggestion(&analysis_with(BTreeMap::new(), 28));
    assert_eq!(heavy.sessions_per_week, 5);

    // 16 sessions over 4 weeks stays at the observed 4
    let steady = plan_suggestion(&analysis_with(BTreeMap::new(), 16));
    assert_eq!(steady.sessions_per_week, 4);
}

#[test]
fn notes_mention_the_focus_groups_and_cadence() {
    let mut volume = BTreeMap::new();
    for group in MuscleGroup::ALL {
        if group != MuscleGroup::Calves && group != MuscleGroup::FullBody {
            volume.insert(group.as_str().to_string(), 10);
        }
    }

    let plan = plan_suggestion(&analysis_with(volume, 16));

    assert_eq!(plan.focus_muscle_groups[0], MuscleGroup::Calves);
    assert!(plan.notes.contains("Calves"));
    assert!(plan.notes.contains("4 sessions"));
}
