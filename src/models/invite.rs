use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invite_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InviteRole {
    Member,
    Trainer,
}

/// Derived lifecycle state of an invite. Never stored: Accepted comes from
/// `accepted_at`, Expired from comparing `expires_at` to the given clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invite {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub token: String,
    pub inviter_id: Uuid,
    pub email: String,
    pub role: InviteRole,
    pub trainer_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invite {
    /// Accepted wins over Expired: an invite accepted before its expiry
    /// stays Accepted forever.
    pub fn status(&self, now: DateTime<Utc>) -> InviteStatus {
        if self.accepted_at.is_some() {
            InviteStatus::Accepted
        } else if self.expires_at <= now {
            InviteStatus::Expired
        } else {
            InviteStatus::Pending
        }
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status(now) == InviteStatus::Pending
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateInvite {
    pub email: String,
    pub role: InviteRole,
    /// Trainer the invited member will be assigned to on acceptance
    pub trainer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AcceptInvite {
    pub token: String,
    pub display_name: String,
    pub password: String,
}

/// Invite as returned by the API, with the derived status attached
#[derive(Debug, Serialize)]
pub struct InviteResponse {
    #[serde(flatten)]
    pub invite: Invite,
    pub status: InviteStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invite(expires_at: DateTime<Utc>, accepted_at: Option<DateTime<Utc>>) -> Invite {
        let now = Utc::now();
        Invite {
            id: Uuid::new_v4(),
            token: "tok".to_string(),
            inviter_id: Uuid::new_v4(),
            email: "new@example.com".to_string(),
            role: InviteRole::Member,
            trainer_id: None,
            expires_at,
            accepted_at,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn status_is_derived_from_timestamps() {
        let now = Utc::now();

        let pending = invite(now + Duration::days(7), None);
        assert_eq!(pending.status(now), InviteStatus::Pending);
        assert!(pending.is_live(now));

        let expired = invite(now - Duration::hours(1), None);
        assert_eq!(expired.status(now), InviteStatus::Expired);
        assert!(!expired.is_live(now));

        let accepted = invite(now + Duration::days(7), Some(now));
        assert_eq!(accepted.status(now), InviteStatus::Accepted);
    }

    #[test]
    fn accepted_invite_never_becomes_expired() {
        let now = Utc::now();
        let accepted_then_lapsed = invite(now - Duration::days(1), Some(now - Duration::days(2)));
        assert_eq!(accepted_then_lapsed.status(now), InviteStatus::Accepted);
    }
}
