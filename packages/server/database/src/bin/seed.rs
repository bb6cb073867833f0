use database::Database;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let db = Database::connect(&database_url).await?;
    db.migrate().await?;

    let result = database::seed::seed_demo_catalogue(&db.pool).await;
    db.close().await;

    let inserted = result?;
    tracing::info!("Seed complete: {} books inserted", inserted);
    Ok(())
}
