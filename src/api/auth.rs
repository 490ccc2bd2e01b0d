use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};

use crate::auth::{
    jwt_auth_middleware, AuthError, AuthResponse, AuthService, ChangePasswordRequest,
    LoginRequest, MessageResponse, UserInfo, UserSession,
};

pub fn auth_routes(auth_service: AuthService) -> Router {
    Router::new()
        .route("/login", post(login))
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .route(
            "/password",
            put(change_password).route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .with_state(auth_service)
}

/// Login with email and password
#[tracing::instrument(skip(auth_service, request))]
async fn login(
    State(auth_service): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}

/// Profile of the authenticated caller
async fn me(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<UserInfo>, AuthError> {
    let info = auth_service.profile(session.user_id).await?;
    Ok(Json(info))
}

/// Change the caller's password
#[tracing::instrument(skip(auth_service, session, request))]
async fn change_password(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    let response = auth_service.change_password(session.user_id, request).await?;
    Ok(Json(response))
}
