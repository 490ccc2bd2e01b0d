use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::sessions::PaginationQuery;
use crate::auth::{admin_only_middleware, jwt_auth_middleware, AuthService};
use crate::models::{TrainerAssignment, User};
use crate::services::stats_service::PlatformStats;
use crate::services::{StatsService, UserService};

#[derive(Clone)]
pub struct AdminState {
    pub stats_service: StatsService,
    pub user_service: UserService,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignment {
    pub trainer_id: Uuid,
    pub member_id: Uuid,
}

pub fn admin_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = AdminState {
        stats_service: StatsService::new(db.clone()),
        user_service: UserService::new(db),
    };

    Router::new()
        .route("/stats", get(platform_stats))
        .route("/users", get(list_users))
        .route("/assignments", post(create_assignment))
        .route(
            "/assignments/:trainer_id/:member_id",
            delete(remove_assignment),
        )
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Platform-wide reporting for the admin dashboard
async fn platform_stats(
    State(state): State<AdminState>,
) -> Result<Json<PlatformStats>, StatusCode> {
    let stats = state
        .stats_service
        .platform_stats()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(stats))
}

async fn list_users(
    State(state): State<AdminState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<User>>, StatusCode> {
    let users = state
        .user_service
        .list_users(pagination.get_limit(), pagination.get_offset())
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(users))
}

async fn create_assignment(
    State(state): State<AdminState>,
    Json(request): Json<CreateAssignment>,
) -> Result<Json<TrainerAssignment>, StatusCode> {
    let assignment = state
        .user_service
        .assign_member(request.trainer_id, request.member_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(assignment))
}

async fn remove_assignment(
    State(state): State<AdminState>,
    Path((trainer_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let removed = state
        .user_service
        .remove_assignment(trainer_id, member_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !removed {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(serde_json::json!({ "removed": true })))
}
