use anyhow::{anyhow, Result};
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::models::{TrainerAssignment, User};
use crate::services::{NotificationService, SuggestionService, UserService};
use crate::services::notification_service::NotificationError;

/// Monday 07:00 UTC, before most members plan their week
const WEEKLY_GENERATION_SCHEDULE: &str = "0 0 7 * * Mon";

/// Weekly background generation of workout suggestions for every
/// trainer-member assignment. One member failing must not abort the batch.
pub struct SuggestionScheduler {
    scheduler: JobScheduler,
}

impl SuggestionScheduler {
    pub async fn new(db: PgPool, notifications: NotificationService) -> Result<Self> {
        let mut scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create job scheduler: {}", e))?;

        let job = Job::new_async(WEEKLY_GENERATION_SCHEDULE, move |_uuid, _lock| {
            let db = db.clone();
            let notifications = notifications.clone();

            Box::pin(async move {
                if let Err(err) = Self::run_weekly_generation(db, notifications).await {
                    error!("Weekly suggestion run failed: {}", err);
                }
            })
        })
        .map_err(|e| anyhow!("Failed to create weekly suggestion job: {}", e))?;

        scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("Failed to schedule weekly suggestion job: {}", e))?;

        Ok(Self { scheduler })
    }

    pub async fn start(&mut self) -> Result<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| anyhow!("Failed to start job scheduler: {}", e))?;

        info!("Suggestion scheduler started");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| anyhow!("Failed to stop job scheduler: {}", e))?;

        info!("Suggestion scheduler stopped");
        Ok(())
    }

    /// Iterate every assignment, generating and delivering per member.
    /// Failures are logged and skipped so the rest of the batch proceeds.
    pub async fn run_weekly_generation(
        db: PgPool,
        notifications: NotificationService,
    ) -> Result<()> {
        let user_service = UserService::new(db.clone());
        let suggestion_service = SuggestionService::new(db);

        let assignments = user_service.list_assignments().await?;
        info!(
            "Weekly suggestion run starting for {} assignments",
            assignments.len()
        );

        let mut generated = 0usize;
        let mut failed = 0usize;

        for assignment in &assignments {
            match Self::generate_and_deliver(
                assignment,
                &user_service,
                &suggestion_service,
                &notifications,
            )
            .await
            {
                Ok(()) => generated += 1,
                Err(err) => {
                    failed += 1;
                    error!(
                        "Suggestion generation failed for member {}: {}",
                        assignment.member_id, err
                    );
                }
            }
        }

        info!(
            "Weekly suggestion run finished: {} generated, {} failed",
            generated, failed
        );
        Ok(())
    }

    async fn generate_and_deliver(
        assignment: &TrainerAssignment,
        user_service: &UserService,
        suggestion_service: &SuggestionService,
        notifications: &NotificationService,
    ) -> Result<()> {
        let member: User = user_service
            .get_user(assignment.member_id)
            .await?
            .ok_or_else(|| anyhow!("member {} no longer exists", assignment.member_id))?;

        let suggestion = suggestion_service.generate_for_user(member.id).await?;

        let preferences = notifications.get_preferences(member.id).await?;
        match notifications
            .send_suggestion_digest(&member, &suggestion, &preferences)
            .await
        {
            Ok(()) => {}
            Err(NotificationError::Disabled) => {
                info!("Member {} has suggestion emails disabled", member.id);
            }
            Err(err) => return Err(err.into()),
        }

        Ok(())
    }
}
