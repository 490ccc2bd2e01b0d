use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{TrainerAssignment, UpdateUser, User};

const USER_COLUMNS: &str =
    "id, email, password_hash, display_name, role, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        data: UpdateUser,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET display_name = COALESCE($2, display_name), updated_at = $3 \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(data.display_name)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// Members coached by the given trainer
    pub async fn list_members(&self, trainer_id: Uuid) -> Result<Vec<User>> {
        let members = sqlx::query_as::<_, User>(
            "SELECT u.id, u.email, u.password_hash, u.display_name, u.role, u.created_at, \
                    u.updated_at \
             FROM users u \
             JOIN trainer_assignments a ON a.member_id = u.id \
             WHERE a.trainer_id = $1 ORDER BY u.display_name",
        )
        .bind(trainer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(members)
    }

    pub async fn assign_member(
        &self,
        trainer_id: Uuid,
        member_id: Uuid,
    ) -> Result<TrainerAssignment> {
        let assignment = sqlx::query_as::<_, TrainerAssignment>(
            "INSERT INTO trainer_assignments (id, trainer_id, member_id, created_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (trainer_id, member_id) DO UPDATE SET trainer_id = EXCLUDED.trainer_id \
             RETURNING id, trainer_id, member_id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(trainer_id)
        .bind(member_id)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(assignment)
    }

    pub async fn remove_assignment(&self, trainer_id: Uuid, member_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM trainer_assignments WHERE trainer_id = $1 AND member_id = $2",
        )
        .bind(trainer_id)
        .bind(member_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_assignments(&self) -> Result<Vec<TrainerAssignment>> {
        let assignments = sqlx::query_as::<_, TrainerAssignment>(
            "SELECT id, trainer_id, member_id, created_at FROM trainer_assignments \
             ORDER BY created_at",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(assignments)
    }
}
