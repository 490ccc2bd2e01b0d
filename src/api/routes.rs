use axum::{routing::get, Router};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::health::health_check;
use super::{
    admin, analysis, auth, cardio, exercises, invites, preferences, programs, sessions,
    suggestions, trainers,
};
use crate::auth::middleware::{cors_layer, security_headers_layer};
use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::services::NotificationService;

pub fn create_routes(
    db: PgPool,
    config: &AppConfig,
    notifications: NotificationService,
) -> Router {
    let auth_service = AuthService::new(db.clone(), &config.jwt_secret);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth::auth_routes(auth_service.clone()))
        .nest(
            "/api/sessions",
            sessions::session_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/cardio",
            cardio::cardio_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/exercises",
            exercises::exercise_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/member-exercises",
            exercises::member_exercise_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/programs",
            programs::program_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/invites",
            invites::invite_routes(db.clone(), auth_service.clone(), notifications.clone()),
        )
        .nest(
            "/api/analysis",
            analysis::analysis_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/suggestions",
            suggestions::suggestion_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/preferences",
            preferences::preference_routes(auth_service.clone(), notifications),
        )
        .nest(
            "/api/trainers",
            trainers::trainer_routes(db.clone(), auth_service.clone()),
        )
        .nest("/api/admin", admin::admin_routes(db, auth_service))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security_headers_layer())
                .layer(cors_layer()),
        )
}
