use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::database::{health_check, init_pool};
use finance::{config::AppConfig, database::run_migrations};

/// Prepares the finance store: connects, applies migrations, and verifies
/// that the services can reach the database.
#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.settings.log)?)
        .init();

    info!("Starting finance service");

    // Initialize database connection pool
    let pool = init_pool(&config.database).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if config.settings.run_migrations {
        run_migrations(&pool).await?;
    }

    info!("Finance service initialized successfully");

    pool.close().await;
    Ok(())
}
