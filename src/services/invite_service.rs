use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;
use serde_json::json;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, PasswordError};
use crate::auth::UserSession;
use crate::models::{
    AcceptInvite, CreateInvite, Invite, InviteRole, InviteStatus, User, UserRole,
};
use crate::services::NotificationService;

/// Invite tokens are single-use capabilities delivered over email
const INVITE_TOKEN_LENGTH: usize = 48;

/// Default invite validity; resending restarts this window
const INVITE_VALIDITY_DAYS: i64 = 7;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

#[derive(Error, Debug)]
pub enum InviteError {
    #[error("Invite not found")]
    NotFound,
    #[error("Invite belongs to another inviter")]
    Forbidden,
    #[error("A live invite already exists for this email")]
    DuplicatePending,
    #[error("A user with this email already exists")]
    EmailTaken,
    #[error("Invite has already been accepted")]
    AlreadyAccepted,
    #[error("Invite has expired")]
    Expired,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Password validation failed: {0}")]
    Password(#[from] PasswordError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for InviteError {
    fn into_response(self) -> Response {
        let status = match self {
            InviteError::NotFound => StatusCode::NOT_FOUND,
            InviteError::Forbidden => StatusCode::FORBIDDEN,
            InviteError::DuplicatePending | InviteError::EmailTaken => StatusCode::CONFLICT,
            InviteError::AlreadyAccepted => StatusCode::CONFLICT,
            InviteError::Expired => StatusCode::GONE,
            InviteError::InvalidEmail(_) | InviteError::Password(_) => StatusCode::BAD_REQUEST,
            InviteError::Database(_) | InviteError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Reject any transition out of a non-pending state. Expiry is derived
/// from the supplied clock, never stored.
pub fn ensure_pending(invite: &Invite, now: DateTime<Utc>) -> Result<(), InviteError> {
    match invite.status(now) {
        InviteStatus::Pending => Ok(()),
        InviteStatus::Accepted => Err(InviteError::AlreadyAccepted),
        InviteStatus::Expired => Err(InviteError::Expired),
    }
}

pub fn generate_invite_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(INVITE_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

fn user_role_for(invite_role: InviteRole) -> UserRole {
    match invite_role {
        InviteRole::Member => UserRole::Member,
        InviteRole::Trainer => UserRole::Trainer,
    }
}

const INVITE_COLUMNS: &str = "id, token, inviter_id, email, role, trainer_id, expires_at, \
     accepted_at, created_at, updated_at";

#[derive(Clone)]
pub struct InviteService {
    db: PgPool,
    notifications: NotificationService,
}

impl InviteService {
    pub fn new(db: PgPool, notifications: NotificationService) -> Self {
        Self { db, notifications }
    }

    /// Create and deliver an invite. At most one live (pending, unexpired)
    /// invite may exist per email at any time.
    pub async fn create_invite(
        &self,
        inviter: &UserSession,
        data: CreateInvite,
    ) -> Result<Invite, InviteError> {
        let email = data.email.trim().to_lowercase();

        let email_regex =
            Regex::new(EMAIL_PATTERN).context("invalid email validation pattern")?;
        if !email_regex.is_match(&email) {
            return Err(InviteError::InvalidEmail(email));
        }

        let user_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
                .bind(&email)
                .fetch_one(&self.db)
                .await?;
        if user_exists > 0 {
            return Err(InviteError::EmailTaken);
        }

        let now = Utc::now();
        let live_invites = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM invites \
             WHERE email = $1 AND accepted_at IS NULL AND expires_at > $2",
        )
        .bind(&email)
        .bind(now)
        .fetch_one(&self.db)
        .await?;
        if live_invites > 0 {
            return Err(InviteError::DuplicatePending);
        }

        let invite = sqlx::query_as::<_, Invite>(&format!(
            "INSERT INTO invites \
                 (id, token, inviter_id, email, role, trainer_id, expires_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             RETURNING {INVITE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(generate_invite_token())
        .bind(inviter.user_id)
        .bind(&email)
        .bind(data.role)
        .bind(data.trainer_id)
        .bind(now + Duration::days(INVITE_VALIDITY_DAYS))
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        info!("User {} invited {} as {:?}", inviter.user_id, email, data.role);
        self.deliver(&invite).await;

        Ok(invite)
    }

    /// Refresh expiry and re-deliver. Legal only from Pending.
    pub async fn resend_invite(
        &self,
        caller: &UserSession,
        invite_id: Uuid,
    ) -> Result<Invite, InviteError> {
        let invite = self.get_invite(invite_id).await?;

        if invite.inviter_id != caller.user_id && caller.role != UserRole::Admin {
            return Err(InviteError::Forbidden);
        }

        let now = Utc::now();
        ensure_pending(&invite, now)?;

        let invite = sqlx::query_as::<_, Invite>(&format!(
            "UPDATE invites SET expires_at = $2, updated_at = $3 WHERE id = $1 \
             RETURNING {INVITE_COLUMNS}"
        ))
        .bind(invite_id)
        .bind(now + Duration::days(INVITE_VALIDITY_DAYS))
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        self.deliver(&invite).await;

        Ok(invite)
    }

    /// Accept a pending invite: create the user, stamp the invite, and for
    /// member invites with an attached trainer create the assignment — all
    /// in one transaction.
    pub async fn accept_invite(&self, data: AcceptInvite) -> Result<User, InviteError> {
        let invite = sqlx::query_as::<_, Invite>(&format!(
            "SELECT {INVITE_COLUMNS} FROM invites WHERE token = $1"
        ))
        .bind(&data.token)
        .fetch_optional(&self.db)
        .await?
        .ok_or(InviteError::NotFound)?;

        let now = Utc::now();
        ensure_pending(&invite, now)?;

        let user_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
                .bind(&invite.email)
                .fetch_one(&self.db)
                .await?;
        if user_exists > 0 {
            return Err(InviteError::EmailTaken);
        }

        let password_hash = hash_password(&data.password)?;

        let mut tx = self.db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, display_name, role, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING id, email, password_hash, display_name, role, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&invite.email)
        .bind(&password_hash)
        .bind(data.display_name.trim())
        .bind(user_role_for(invite.role))
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE invites SET accepted_at = $2, updated_at = $2 WHERE id = $1")
            .bind(invite.id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        if invite.role == InviteRole::Member {
            if let Some(trainer_id) = invite.trainer_id {
                sqlx::query(
                    "INSERT INTO trainer_assignments (id, trainer_id, member_id, created_at) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(Uuid::new_v4())
                .bind(trainer_id)
                .bind(user.id)
                .bind(now)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        info!("Invite {} accepted, user {} created", invite.id, user.id);
        Ok(user)
    }

    /// Admins see every invite, trainers their own
    pub async fn list_invites(&self, caller: &UserSession) -> Result<Vec<Invite>, InviteError> {
        let invites = if caller.role == UserRole::Admin {
            sqlx::query_as::<_, Invite>(&format!(
                "SELECT {INVITE_COLUMNS} FROM invites ORDER BY created_at DESC"
            ))
            .fetch_all(&self.db)
            .await?
        } else {
            sqlx::query_as::<_, Invite>(&format!(
                "SELECT {INVITE_COLUMNS} FROM invites WHERE inviter_id = $1 \
                 ORDER BY created_at DESC"
            ))
            .bind(caller.user_id)
            .fetch_all(&self.db)
            .await?
        };

        Ok(invites)
    }

    async fn get_invite(&self, invite_id: Uuid) -> Result<Invite, InviteError> {
        let invite = sqlx::query_as::<_, Invite>(&format!(
            "SELECT {INVITE_COLUMNS} FROM invites WHERE id = $1"
        ))
        .bind(invite_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(InviteError::NotFound)?;

        Ok(invite)
    }

    /// Delivery failures never fail the invite operation itself
    async fn deliver(&self, invite: &Invite) {
        if let Err(err) = self.notifications.send_invite(invite).await {
            warn!("Failed to deliver invite {} email: {}", invite.id, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_tokens_are_long_alphanumeric_and_unique() {
        let a = generate_invite_token();
        let b = generate_invite_token();

        assert_eq!(a.len(), INVITE_TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn invite_roles_map_onto_user_roles() {
        assert_eq!(user_role_for(InviteRole::Member), UserRole::Member);
        assert_eq!(user_role_for(InviteRole::Trainer), UserRole::Trainer);
    }
}
