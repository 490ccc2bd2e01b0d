use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{NotificationPreferences, UpdateNotificationPreferences};
use crate::services::notification_service::NotificationError;
use crate::services::NotificationService;

#[derive(Clone)]
pub struct PreferencesState {
    pub notifications: NotificationService,
}

pub fn preference_routes(auth_service: AuthService, notifications: NotificationService) -> Router {
    let state = PreferencesState { notifications };

    Router::new()
        .route("/", get(get_preferences).put(update_preferences))
        .layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

async fn get_preferences(
    State(state): State<PreferencesState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<NotificationPreferences>, NotificationError> {
    let preferences = state.notifications.get_preferences(session.user_id).await?;
    Ok(Json(preferences))
}

/// Validated write; malformed quiet hours or timezone are rejected
async fn update_preferences(
    State(state): State<PreferencesState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<UpdateNotificationPreferences>,
) -> Result<Json<NotificationPreferences>, NotificationError> {
    let preferences = state
        .notifications
        .update_preferences(session.user_id, request)
        .await?;
    Ok(Json(preferences))
}
