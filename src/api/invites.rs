use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::post,
    Extension, Router,
};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    jwt_auth_middleware, trainer_or_admin_middleware, AuthService, UserSession,
};
use crate::models::{AcceptInvite, CreateInvite, InviteResponse, UserRole};
use crate::services::{InviteError, InviteService, NotificationService};

#[derive(Clone)]
pub struct InvitesState {
    pub invite_service: InviteService,
}

pub fn invite_routes(
    db: PgPool,
    auth_service: AuthService,
    notifications: NotificationService,
) -> Router {
    let state = InvitesState {
        invite_service: InviteService::new(db, notifications),
    };

    let managed = Router::new()
        .route("/", post(create_invite).get(list_invites))
        .route("/:invite_id/resend", post(resend_invite))
        .route_layer(middleware::from_fn(trainer_or_admin_middleware))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ));

    // Acceptance is unauthenticated: the token is the credential
    Router::new()
        .route("/accept", post(accept_invite))
        .merge(managed)
        .with_state(state)
}

/// Invite someone by email. Trainers invite members onto their own roster;
/// admins can invite members for any trainer, or new trainers.
async fn create_invite(
    State(state): State<InvitesState>,
    Extension(session): Extension<UserSession>,
    Json(mut request): Json<CreateInvite>,
) -> Result<Json<InviteResponse>, InviteError> {
    // a trainer's member invites always land on their own roster
    if session.role == UserRole::Trainer {
        request.trainer_id = Some(session.user_id);
    }

    let invite = state.invite_service.create_invite(&session, request).await?;
    let status = invite.status(Utc::now());

    Ok(Json(InviteResponse { invite, status }))
}

async fn list_invites(
    State(state): State<InvitesState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<InviteResponse>>, InviteError> {
    let now = Utc::now();
    let invites = state
        .invite_service
        .list_invites(&session)
        .await?
        .into_iter()
        .map(|invite| {
            let status = invite.status(now);
            InviteResponse { invite, status }
        })
        .collect();

    Ok(Json(invites))
}

/// Refresh expiry and re-deliver; rejected unless the invite is pending
async fn resend_invite(
    State(state): State<InvitesState>,
    Extension(session): Extension<UserSession>,
    Path(invite_id): Path<Uuid>,
) -> Result<Json<InviteResponse>, InviteError> {
    let invite = state
        .invite_service
        .resend_invite(&session, invite_id)
        .await?;
    let status = invite.status(Utc::now());

    Ok(Json(InviteResponse { invite, status }))
}

/// Accept a pending invite, creating the account (and trainer assignment
/// for member invites) atomically
async fn accept_invite(
    State(state): State<InvitesState>,
    Json(request): Json<AcceptInvite>,
) -> Result<Json<crate::models::User>, InviteError> {
    let user = state.invite_service.accept_invite(request).await?;
    Ok(Json(user))
}
