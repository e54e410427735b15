use std::sync::Arc;

use auth::TokenService;
use job_tracker::config::Config;
use job_tracker::config::StorageBackend;
use job_tracker::inbound::http::router::create_router;
use job_tracker::inbound::http::router::AppState;
use job_tracker::outbound::repositories::InMemoryStore;
use job_tracker::outbound::repositories::PostgresCompanyRepository;
use job_tracker::outbound::repositories::PostgresCredentialStore;
use job_tracker::outbound::repositories::PostgresInterviewRepository;
use job_tracker::outbound::repositories::PostgresJobApplicationRepository;
use job_tracker::outbound::repositories::PostgresJobRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "job_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "job-tracker",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let tokens = Arc::new(TokenService::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::hours(config.jwt.expiration_hours),
    ));

    let state = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            AppState::from_repositories(
                Arc::new(PostgresCredentialStore::new(pg_pool.clone())),
                Arc::new(PostgresCompanyRepository::new(pg_pool.clone())),
                Arc::new(PostgresJobRepository::new(pg_pool.clone())),
                Arc::new(PostgresJobApplicationRepository::new(pg_pool.clone())),
                Arc::new(PostgresInterviewRepository::new(pg_pool)),
                tokens,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on exit");
            let store = Arc::new(InMemoryStore::new());
            AppState::from_repositories(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                store,
                tokens,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(state)).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
