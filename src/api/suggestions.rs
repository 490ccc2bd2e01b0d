use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use sqlx::PgPool;
use tracing::error;

use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::WorkoutSuggestion;
use crate::services::SuggestionService;

#[derive(Clone)]
pub struct SuggestionsState {
    pub suggestion_service: SuggestionService,
}

pub fn suggestion_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = SuggestionsState {
        suggestion_service: SuggestionService::new(db),
    };

    Router::new()
        .route("/", get(latest_suggestion))
        .route("/generate", post(generate_suggestion))
        .layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Latest stored suggestion for the caller
async fn latest_suggestion(
    State(state): State<SuggestionsState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<WorkoutSuggestion>, StatusCode> {
    let suggestion = state
        .suggestion_service
        .latest_for_user(session.user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(suggestion))
}

/// Generate (or regenerate) this week's suggestion on demand
async fn generate_suggestion(
    State(state): State<SuggestionsState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<WorkoutSuggestion>, StatusCode> {
    let suggestion = state
        .suggestion_service
        .generate_for_user(session.user_id)
        .await
        .map_err(|err| {
            error!(
                "Suggestion generation failed for user {}: {}",
                session.user_id, err
            );
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(suggestion))
}
