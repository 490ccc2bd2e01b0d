use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{delete, post},
    Extension, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{CardioEntry, CreateCardioEntry};
use crate::services::CardioService;

#[derive(Debug, Deserialize)]
pub struct CardioListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct CardioState {
    pub cardio_service: CardioService,
}

pub fn cardio_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = CardioState {
        cardio_service: CardioService::new(db),
    };

    Router::new()
        .route("/", post(create_entry).get(list_entries))
        .route("/:entry_id", delete(delete_entry))
        .layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

async fn create_entry(
    State(state): State<CardioState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateCardioEntry>,
) -> Result<Json<CardioEntry>, StatusCode> {
    if request.duration_seconds <= 0 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let entry = state
        .cardio_service
        .create_entry(session.user_id, request)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(entry))
}

async fn list_entries(
    State(state): State<CardioState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<CardioListQuery>,
) -> Result<Json<Vec<CardioEntry>>, StatusCode> {
    let entries = state
        .cardio_service
        .list_entries(session.user_id, query.start_date, query.end_date)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(entries))
}

async fn delete_entry(
    State(state): State<CardioState>,
    Extension(session): Extension<UserSession>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let deleted = state
        .cardio_service
        .delete_entry(session.user_id, entry_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
