use anyhow::Result;
use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::models::UserRole;

/// Platform-wide counters for the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct PlatformStats {
    pub total_users: i64,
    pub users_by_role: BTreeMap<String, i64>,
    pub sessions_completed_last_30_days: i64,
    pub cardio_entries_last_30_days: i64,
    pub pending_invites: i64,
    pub total_programs: i64,
    pub template_installs: i64,
}

#[derive(Debug, Clone)]
pub struct StatsService {
    db: PgPool,
}

impl StatsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn platform_stats(&self) -> Result<PlatformStats> {
        let now = Utc::now();
        let thirty_days_ago = now - Duration::days(30);

        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await?;

        let role_rows = sqlx::query_as::<_, (UserRole, i64)>(
            "SELECT role, COUNT(*) FROM users GROUP BY role",
        )
        .fetch_all(&self.db)
        .await?;
        let users_by_role = role_rows
            .into_iter()
            .map(|(role, count)| (role.as_str().to_string(), count))
            .collect();

        let sessions_completed_last_30_days = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM training_sessions WHERE completed_at >= $1",
        )
        .bind(thirty_days_ago)
        .fetch_one(&self.db)
        .await?;

        let cardio_entries_last_30_days = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cardio_entries WHERE date >= $1",
        )
        .bind(thirty_days_ago.date_naive())
        .fetch_one(&self.db)
        .await?;

        let pending_invites = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM invites WHERE accepted_at IS NULL AND expires_at > $1",
        )
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        let total_programs = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM programs")
            .fetch_one(&self.db)
            .await?;

        let template_installs = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(install_count), 0) FROM programs WHERE is_template",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(PlatformStats {
            total_users,
            users_by_role,
            sessions_completed_last_30_days,
            cardio_entries_last_30_days,
            pending_invites,
            total_programs,
            template_installs,
        })
    }
}
