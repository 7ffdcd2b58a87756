use std::sync::Arc;

use auth::Authenticator;
use auth::AuthorizationGuard;
use sqlx::postgres::PgPoolOptions;
use todo_service::config::Config;
use todo_service::domain::task::service::TaskService;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::inbound::http::router::AppState;
use todo_service::outbound::repositories::PostgresTaskRepository;
use todo_service::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        host = %config.server.host,
        http_port = config.server.http_port,
        cookie_name = %config.session.cookie_name,
        allowed_origins = ?config.cors.allowed_origins,
        "Configuration loaded"
    );

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

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let guard = Arc::new(AuthorizationGuard::new(Arc::clone(&authenticator)));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let task_repository = Arc::new(PostgresTaskRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(user_repository, authenticator));
    let task_service = Arc::new(TaskService::new(task_repository));

    let state = AppState::new(
        user_service,
        task_service,
        guard,
        &config.session.cookie_name,
    );
    let http_application = create_router(state, &config.cors.allowed_origins);

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
