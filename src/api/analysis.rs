use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::error;

use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::WorkoutAnalysis;
use crate::services::AnalysisService;

/// Window bounds accepted by the analysis endpoint
const MIN_WINDOW_DAYS: i64 = 7;
const MAX_WINDOW_DAYS: i64 = 90;
const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Trailing window in days (default: 30, min: 7, max: 90)
    pub days: Option<i64>,
}

impl AnalysisQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(days) = self.days {
            if !(MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).contains(&days) {
                return Err("Days must be between 7 and 90");
            }
        }
        Ok(())
    }

    pub fn get_days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_WINDOW_DAYS)
    }
}

#[derive(Clone)]
pub struct AnalysisState {
    pub analysis_service: AnalysisService,
}

pub fn analysis_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = AnalysisState {
        analysis_service: AnalysisService::new(db),
    };

    Router::new()
        .route("/", get(get_analysis))
        .layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Aggregated training report for the authenticated caller
async fn get_analysis(
    State(state): State<AnalysisState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<WorkoutAnalysis>, StatusCode> {
    if query.validate().is_err() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let analysis = state
        .analysis_service
        .analyze(session.user_id, query.get_days())
        .await
        .map_err(|err| {
            error!("Analysis failed for user {}: {}", session.user_id, err);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds_are_enforced() {
        assert!(AnalysisQuery { days: Some(6) }.validate().is_err());
        assert!(AnalysisQuery { days: Some(7) }.validate().is_ok());
        assert!(AnalysisQuery { days: Some(90) }.validate().is_ok());
        assert!(AnalysisQuery { days: Some(91) }.validate().is_err());
        assert!(AnalysisQuery { days: None }.validate().is_ok());
    }

    #[test]
    fn window_defaults_to_thirty_days() {
        assert_eq!(AnalysisQuery { days: None }.get_days(), 30);
        assert_eq!(AnalysisQuery { days: Some(7) }.get_days(), 7);
    }
}
