use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};
use sqlx::PgPool;

use crate::auth::{
    jwt_auth_middleware, trainer_or_admin_middleware, AuthService, UserSession,
};
use crate::models::User;
use crate::services::UserService;

#[derive(Clone)]
pub struct TrainersState {
    pub user_service: UserService,
}

pub fn trainer_routes(db: PgPool, auth_service: AuthService) -> Router {
    let state = TrainersState {
        user_service: UserService::new(db),
    };

    Router::new()
        .route("/members", get(list_members))
        .route_layer(middleware::from_fn(trainer_or_admin_middleware))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Members assigned to the calling trainer
async fn list_members(
    State(state): State<TrainersState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<User>>, StatusCode> {
    let members = state
        .user_service
        .list_members(session.user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(members))
}
