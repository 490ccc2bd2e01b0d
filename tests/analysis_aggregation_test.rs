mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use common::{
    cardio_entry, completed_session, completed_set_without_metrics, muscle_exercise,
    performed_set, skipped_set,
};
use ironcoach::models::{CardioType, MuscleGroup};
use ironcoach::services::analysis_service::{build_report, AnalysisWindow};

fn window_ending_at(end: chrono::DateTime<Utc>) -> AnalysisWindow {
    AnalysisWindow::trailing(30, end)
}

#[test]
fn empty_window_yields_all_zero_report() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let window = window_ending_at(now);

    let report = build_report(user_id, &[], &[], &window, now);

    assert_eq!(report.session_summary.total_sessions, 0);
    assert_eq!(report.session_summary.average_duration_minutes, 0.0);
    assert!(report.muscle_groups.frequency.is_empty());
    assert!(report.muscle_groups.volume.is_empty());
    assert_eq!(report.cardio_analysis.total_sessions, 0);
    assert!(report.cardio_analysis.by_type.is_empty());
    assert_eq!(report.volume_metrics.total_sets, 0);
    assert_eq!(report.volume_metrics.total_volume, 0.0);
    assert_eq!(report.volume_metrics.average_reps_per_set, 0.0);
    assert!(report.weekly_patterns.training_days.is_empty());
}

#[test]
fn muscle_group_volume_counts_completed_sets_per_group() {
    let user_id = Uuid::new_v4();
    let now = Utc.with_ymd_and_hms(2025, 6, 13, 18, 0, 0).unwrap();
    let window = window_ending_at(now);

    let chest_session = completed_session(
        user_id,
        Utc.with_ymd_and_hms(2025, 6, 9, 18, 0, 0).unwrap(),
        vec![muscle_exercise(
            MuscleGroup::Chest,
            vec![
                performed_set(10, 60.0),
                performed_set(8, 70.0),
                performed_set(6, 80.0),
            ],
        )],
    );
    let back_session = completed_session(
        user_id,
        Utc.with_ymd_and_hms(2025, 6, 11, 18, 0, 0).unwrap(),
        vec![muscle_exercise(
            MuscleGroup::Back,
            vec![
                performed_set(12, 40.0),
                performed_set(10, 45.0),
                performed_set(8, 50.0),
                performed_set(6, 55.0),
            ],
        )],
    );

    let report = build_report(user_id, &[chest_session, back_session], &[], &window, now);

    assert_eq!(report.muscle_groups.volume.get("chest"), Some(&3));
    assert_eq!(report.muscle_groups.volume.get("back"), Some(&4));
    assert_eq!(report.muscle_groups.volume.len(), 2);

    let frequency_keys: Vec<&str> = report
        .muscle_groups
        .frequency
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(frequency_keys, vec!["back", "chest"]);
    assert_eq!(report.muscle_groups.frequency.get("chest"), Some(&1));
    assert_eq!(report.muscle_groups.frequency.get("back"), Some(&1));
}

#[test]
fn volume_metrics_sum_weight_times_reps_over_completed_sets() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let window = window_ending_at(now);

    let session = completed_session(
        user_id,
        now,
        vec![muscle_exercise(
            MuscleGroup::Quads,
            vec![performed_set(10, 50.0), performed_set(8, 55.0)],
        )],
    );

    let report = build_report(user_id, &[session], &[], &window, now);

    assert_eq!(report.volume_metrics.total_sets, 2);
    assert_eq!(report.volume_metrics.total_volume, 940.0);
    assert_eq!(report.volume_metrics.average_reps_per_set, 9.0);
}

#[test]
fn incomplete_or_metricless_sets_do_not_count_toward_volume() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let window = window_ending_at(now);

    let session = completed_session(
        user_id,
        now,
        vec![muscle_exercise(
            MuscleGroup::Shoulders,
            vec![
                performed_set(10, 30.0),
                // completed but without weight/reps: counts as a set only
                completed_set_without_metrics(),
                // never completed: contributes nothing at all
                skipped_set(12, 25.0),
            ],
        )],
    );

    let report = build_report(user_id, &[session], &[], &window, now);

    assert_eq!(report.volume_metrics.total_sets, 2);
    assert_eq!(report.volume_metrics.total_volume, 300.0);
    assert_eq!(report.volume_metrics.average_reps_per_set, 10.0);
    assert_eq!(report.muscle_groups.volume.get("shoulders"), Some(&2));
}

#[test]
fn session_with_no_completed_sets_still_counts_as_a_session() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let window = window_ending_at(now);

    let session = completed_session(
        user_id,
        now,
        vec![muscle_exercise(
            MuscleGroup::Biceps,
            vec![skipped_set(10, 20.0)],
        )],
    );

    let report = build_report(user_id, &[session], &[], &window, now);

    assert_eq!(report.session_summary.total_sessions, 1);
    assert_eq!(report.volume_metrics.total_sets, 0);
    assert_eq!(report.volume_metrics.total_volume, 0.0);
    assert!(report.muscle_groups.volume.is_empty());
    assert!(report.muscle_groups.frequency.is_empty());
}

#[test]
fn cardio_entries_are_counted_and_summed_by_type() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let window = window_ending_at(now);

    let cardio = vec![
        cardio_entry(
            user_id,
            CardioType::Run,
            1800,
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        ),
        cardio_entry(
            user_id,
            CardioType::Bike,
            2400,
            NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
        ),
    ];

    let report = build_report(user_id, &[], &cardio, &window, now);

    assert_eq!(report.cardio_analysis.total_sessions, 2);
    assert_eq!(report.cardio_analysis.by_type.get("run"), Some(&1));
    assert_eq!(report.cardio_analysis.by_type.get("bike"), Some(&1));
    assert!(report.cardio_analysis.total_duration_minutes > 60.0);
    assert_eq!(report.cardio_analysis.total_duration_minutes, 70.0);
}

#[test]
fn weekly_patterns_track_completion_weekdays() {
    let user_id = Uuid::new_v4();
    let now = Utc.with_ymd_and_hms(2025, 6, 13, 20, 0, 0).unwrap();
    let window = window_ending_at(now);

    // 2025-06-09 is a Monday, 2025-06-11 a Wednesday
    let monday = completed_session(
        user_id,
        Utc.with_ymd_and_hms(2025, 6, 9, 18, 0, 0).unwrap(),
        vec![],
    );
    let wednesday = completed_session(
        user_id,
        Utc.with_ymd_and_hms(2025, 6, 11, 18, 0, 0).unwrap(),
        vec![],
    );

    let report = build_report(user_id, &[monday, wednesday], &[], &window, now);

    let days: Vec<&str> = report
        .weekly_patterns
        .training_days
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(days, vec!["Monday", "Wednesday"]);
    assert_eq!(report.weekly_patterns.day_counts.get("Monday"), Some(&1));
    assert_eq!(report.weekly_patterns.day_counts.get("Wednesday"), Some(&1));
    assert_eq!(report.weekly_patterns.day_counts.len(), 2);
}

#[test]
fn session_durations_are_averaged_in_minutes() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let window = window_ending_at(now);

    // builder sessions run exactly 60 minutes
    let sessions = vec![
        completed_session(user_id, now - chrono::Duration::days(1), vec![]),
        completed_session(user_id, now - chrono::Duration::days(3), vec![]),
    ];

    let report = build_report(user_id, &sessions, &[], &window, now);

    assert_eq!(report.session_summary.total_sessions, 2);
    assert_eq!(report.session_summary.total_duration_minutes, 120.0);
    assert_eq!(report.session_summary.average_duration_minutes, 60.0);
}
