use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Aggregated training report over a trailing window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutAnalysis {
    pub user_id: Uuid,
    pub window_days: i64,
    pub generated_at: DateTime<Utc>,
    pub session_summary: SessionSummary,
    pub muscle_groups: MuscleGroupBreakdown,
    pub cardio_analysis: CardioAnalysis,
    pub volume_metrics: VolumeMetrics,
    pub weekly_patterns: WeeklyPatterns,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Completed sessions inside the window
    pub total_sessions: i64,
    pub total_duration_minutes: f64,
    pub average_duration_minutes: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupBreakdown {
    /// Muscle group -> number of distinct sessions touching it
    pub frequency: BTreeMap<String, i64>,
    /// Muscle group -> completed-set count. A set count, not weight x reps;
    /// tonnage lives in [`VolumeMetrics::total_volume`].
    pub volume: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardioAnalysis {
    pub total_sessions: i64,
    pub by_type: BTreeMap<String, i64>,
    pub total_duration_minutes: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeMetrics {
    /// Completed sets, whether or not they carry weight/reps
    pub total_sets: i64,
    /// Sum of weight x reps over completed sets with both values present
    pub total_volume: f64,
    /// Mean performed reps over completed sets that recorded reps
    pub average_reps_per_set: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPatterns {
    /// Weekday names with at least one completed session
    pub training_days: BTreeSet<String>,
    /// Weekday name -> completed-session count
    pub day_counts: BTreeMap<String, i64>,
}
