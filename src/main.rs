use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eco_violation_bot::app::build_router;
use eco_violation_bot::catalog;
use eco_violation_bot::config::AppConfig;
use eco_violation_bot::database::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eco_violation_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Eco Violation Bot webhook");

    let config = AppConfig::load()?;
    info!("Configuration loaded");

    let database = Database::new(&config.database_url).await?;
    info!("Database connected");

    database.run_migrations().await?;
    info!("Database migrations completed");

    let seed = catalog::resolve_catalog(config.catalog_path.as_deref())?;
    database.seed_violations(&seed).await?;
    info!(
        "Violation catalog ready ({} records)",
        database.count_violations().await?
    );

    let addr = config.bind_address();
    let app = build_router(config, database);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
