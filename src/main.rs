use ironcoach::api::routes::create_routes;
use ironcoach::config::{run_migrations, AppConfig, DatabaseConfig, MailConfig};
use ironcoach::services::{NotificationService, SuggestionScheduler};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let app_config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let mail_config = MailConfig::from_env();

    let db = db_config.create_pool().await?;
    run_migrations(&db).await?;

    let notifications = NotificationService::new(db.clone(), mail_config)?;

    // Weekly suggestion generation runs independently of the request path
    let mut scheduler = SuggestionScheduler::new(db.clone(), notifications.clone()).await?;
    scheduler.start().await?;

    let app = create_routes(db, &app_config, notifications);

    let listener = TcpListener::bind(app_config.server_address()).await?;
    info!(
        "ironcoach server starting on http://{}",
        app_config.server_address()
    );
    axum::serve(listener, app).await?;

    Ok(())
}
