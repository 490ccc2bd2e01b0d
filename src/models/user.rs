use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User roles for role-based access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Trainer,
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Trainer => "trainer",
            UserRole::Member => "member",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(UserRole::Admin),
            "trainer" => Some(UserRole::Trainer),
            "member" => Some(UserRole::Member),
            _ => None,
        }
    }

    /// Check if this role has permission to access another role's resources
    pub fn can_access(&self, target_role: &UserRole) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Trainer => matches!(target_role, UserRole::Trainer | UserRole::Member),
            UserRole::Member => matches!(target_role, UserRole::Member),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUser {
    pub display_name: Option<String>,
}

/// One trainer-to-member coaching link
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainerAssignment {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub member_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_hierarchy() {
        assert!(UserRole::Admin.can_access(&UserRole::Member));
        assert!(UserRole::Admin.can_access(&UserRole::Trainer));
        assert!(UserRole::Trainer.can_access(&UserRole::Member));
        assert!(!UserRole::Trainer.can_access(&UserRole::Admin));
        assert!(!UserRole::Member.can_access(&UserRole::Trainer));
    }

    #[test]
    fn role_round_trip() {
        for role in [UserRole::Admin, UserRole::Trainer, UserRole::Member] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("owner"), None);
    }
}
