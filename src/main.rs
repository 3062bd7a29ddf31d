use anyhow::Context;
use catalog::configuration::get_configuration;
use catalog::repository::PgProductRepository;
use catalog::services::ProductService;
use catalog::startup::run;
use catalog::telemetry::{get_subscriber, init_subscriber};
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("catalog".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = get_configuration().context("Failed to read configuration.")?;

    tracing::info!(
        db_host = %settings.database.host,
        db_port = settings.database.port,
        db_name = %settings.database.database_name,
        "Connecting to PostgreSQL"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .acquire_timeout(Duration::from_secs(settings.database.acquire_timeout_secs))
        .connect_with(settings.database.with_db())
        .await
        .context("Failed to connect to database.")?;

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to migrate database.")?;

    let service = ProductService::new(Arc::new(PgProductRepository::new(pg_pool)));

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind to {}", address))?;

    run(listener, service).await?.await?;
    Ok(())
}
