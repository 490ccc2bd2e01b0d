use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Per-user delivery configuration. Explicit named fields, validated on
/// write; send paths read these flags and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationPreferences {
    pub user_id: Uuid,
    pub email_enabled: bool,
    pub weekly_digest: bool,
    pub suggestion_alerts: bool,
    pub invite_reminders: bool,
    /// HH:MM, validated by [`UpdateNotificationPreferences::validate`]
    pub quiet_hours_start: String,
    pub quiet_hours_end: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationPreferences {
    pub fn defaults_for(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email_enabled: true,
            weekly_digest: true,
            suggestion_alerts: true,
            invite_reminders: true,
            quiet_hours_start: "22:00".to_string(),
            quiet_hours_end: "07:00".to_string(),
            timezone: "UTC".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateNotificationPreferences {
    pub email_enabled: Option<bool>,
    pub weekly_digest: Option<bool>,
    pub suggestion_alerts: Option<bool>,
    pub invite_reminders: Option<bool>,
    pub quiet_hours_start: Option<String>,
    pub quiet_hours_end: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreferencesError {
    #[error("invalid quiet-hours time {0:?}, expected HH:MM")]
    InvalidTime(String),
    #[error("timezone must not be empty")]
    EmptyTimezone,
}

impl UpdateNotificationPreferences {
    pub fn validate(&self) -> Result<(), PreferencesError> {
        for time in [&self.quiet_hours_start, &self.quiet_hours_end]
            .into_iter()
            .flatten()
        {
            if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
                return Err(PreferencesError::InvalidTime(time.clone()));
            }
        }
        if let Some(tz) = &self.timezone {
            if tz.trim().is_empty() {
                return Err(PreferencesError::EmptyTimezone);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update() -> UpdateNotificationPreferences {
        UpdateNotificationPreferences {
            email_enabled: None,
            weekly_digest: None,
            suggestion_alerts: None,
            invite_reminders: None,
            quiet_hours_start: None,
            quiet_hours_end: None,
            timezone: None,
        }
    }

    #[test]
    fn quiet_hours_must_parse() {
        let mut req = update();
        req.quiet_hours_start = Some("21:30".to_string());
        assert_eq!(req.validate(), Ok(()));

        req.quiet_hours_start = Some("9pm".to_string());
        assert_eq!(
            req.validate(),
            Err(PreferencesError::InvalidTime("9pm".to_string()))
        );
    }

    #[test]
    fn timezone_must_be_non_empty() {
        let mut req = update();
        req.timezone = Some("  ".to_string());
        assert_eq!(req.validate(), Err(PreferencesError::EmptyTimezone));
    }
}
