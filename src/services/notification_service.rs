use anyhow::{anyhow, Result};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use serde_json::json;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::MailConfig;
use crate::models::{
    Invite, NotificationPreferences, PreferencesError, UpdateNotificationPreferences, User,
    WorkoutSuggestion,
};

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Email notifications are disabled for this user")]
    Disabled,
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
    #[error("Email sending failed: {0}")]
    Smtp(String),
    #[error("Invalid preferences: {0}")]
    Preferences(#[from] PreferencesError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for NotificationError {
    fn into_response(self) -> Response {
        let status = match self {
            NotificationError::Preferences(_) | NotificationError::InvalidAddress(_) => {
                StatusCode::BAD_REQUEST
            }
            NotificationError::Disabled => StatusCode::CONFLICT,
            NotificationError::Smtp(_) | NotificationError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

const PREFERENCE_COLUMNS: &str = "user_id, email_enabled, weekly_digest, suggestion_alerts, \
     invite_reminders, quiet_hours_start, quiet_hours_end, timezone, created_at, updated_at";

/// Outbound mail plus per-user notification preferences. Without an SMTP
/// host configured the service logs outbound messages instead of sending,
/// so invite creation and background jobs keep working in development.
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
    config: MailConfig,
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl NotificationService {
    pub fn new(db: PgPool, config: MailConfig) -> Result<Self> {
        let mailer = match &config.smtp_host {
            Some(host) => Some(
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| anyhow!("Failed to configure SMTP relay: {}", e))?
                    .port(config.smtp_port)
                    .credentials(Credentials::new(
                        config.smtp_username.clone(),
                        config.smtp_password.clone(),
                    ))
                    .build(),
            ),
            None => None,
        };

        Ok(Self { db, config, mailer })
    }

    /// Invite emails always go out: the recipient has no account yet, so
    /// there are no preferences to consult
    pub async fn send_invite(&self, invite: &Invite) -> Result<(), NotificationError> {
        let accept_url = format!("{}/invites/accept?token={}", self.config.app_url, invite.token);
        let subject = "You have been invited to Ironcoach";
        let body = format!(
            "Hi,\n\nYou have been invited to join Ironcoach.\n\n\
             Accept your invite here: {}\n\n\
             The invite expires on {}.\n",
            accept_url,
            invite.expires_at.format("%B %d, %Y"),
        );

        self.send_email(&invite.email, subject, &body).await
    }

    /// Weekly digest with the generated suggestion, gated on the member's
    /// delivery preferences
    pub async fn send_suggestion_digest(
        &self,
        user: &User,
        suggestion: &WorkoutSuggestion,
        preferences: &NotificationPreferences,
    ) -> Result<(), NotificationError> {
        if !preferences.email_enabled || !preferences.suggestion_alerts {
            return Err(NotificationError::Disabled);
        }

        let subject = "Your weekly training suggestion";
        let focus = suggestion.focus_muscle_groups.join(", ");
        let body = format!(
            "Hi {},\n\nHere is your suggested focus for the week of {}:\n\n\
             Focus muscle groups: {}\n\
             Suggested sessions: {} per week\n\n{}\n",
            user.display_name,
            suggestion.week_start.format("%B %d, %Y"),
            focus,
            suggestion.sessions_per_week,
            suggestion.notes,
        );

        self.send_email(&user.email, subject, &body).await
    }

    /// Preferences for a user, falling back to defaults when none are stored
    pub async fn get_preferences(
        &self,
        user_id: Uuid,
    ) -> Result<NotificationPreferences, NotificationError> {
        let preferences = sqlx::query_as::<_, NotificationPreferences>(&format!(
            "SELECT {PREFERENCE_COLUMNS} FROM notification_preferences WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(preferences.unwrap_or_else(|| NotificationPreferences::defaults_for(user_id, Utc::now())))
    }

    /// Validated upsert of a user's preferences
    pub async fn update_preferences(
        &self,
        user_id: Uuid,
        data: UpdateNotificationPreferences,
    ) -> Result<NotificationPreferences, NotificationError> {
        data.validate()?;

        let current = self.get_preferences(user_id).await?;
        let now = Utc::now();

        let preferences = sqlx::query_as::<_, NotificationPreferences>(&format!(
            "INSERT INTO notification_preferences \
                 (user_id, email_enabled, weekly_digest, suggestion_alerts, invite_reminders, \
                  quiet_hours_start, quiet_hours_end, timezone, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 email_enabled = EXCLUDED.email_enabled, \
                 weekly_digest = EXCLUDED.weekly_digest, \
                 suggestion_alerts = EXCLUDED.suggestion_alerts, \
                 invite_reminders = EXCLUDED.invite_reminders, \
                 quiet_hours_start = EXCLUDED.quiet_hours_start, \
                 quiet_hours_end = EXCLUDED.quiet_hours_end, \
                 timezone = EXCLUDED.timezone, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING {PREFERENCE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(data.email_enabled.unwrap_or(current.email_enabled))
        .bind(data.weekly_digest.unwrap_or(current.weekly_digest))
        .bind(data.suggestion_alerts.unwrap_or(current.suggestion_alerts))
        .bind(data.invite_reminders.unwrap_or(current.invite_reminders))
        .bind(data.quiet_hours_start.unwrap_or(current.quiet_hours_start))
        .bind(data.quiet_hours_end.unwrap_or(current.quiet_hours_end))
        .bind(data.timezone.unwrap_or(current.timezone))
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(preferences)
    }

    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        let Some(mailer) = &self.mailer else {
            info!("Mail delivery disabled; would send {:?} to {}", subject, to);
            return Ok(());
        };

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse::<Mailbox>()
            .map_err(|_| NotificationError::InvalidAddress(self.config.from_email.clone()))?;
        let to_mailbox = to
            .parse::<Mailbox>()
            .map_err(|_| NotificationError::InvalidAddress(to.to_string()))?;

        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| NotificationError::Smtp(e.to_string()))?;

        mailer
            .send(message)
            .await
            .map_err(|e| NotificationError::Smtp(e.to_string()))?;

        info!("Sent email {:?} to {}", subject, to);
        Ok(())
    }
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("smtp_configured", &self.mailer.is_some())
            .finish()
    }
}
