use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::ports::SystemClock;
use account_service::domain::account::reset::PasswordResetFlow;
use account_service::domain::account::service::AuthenticationService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::events::KafkaEventProducer;
use account_service::outbound::notifications::SmtpNotifier;
use account_service::outbound::repositories::InMemoryResetTokenLedger;
use account_service::outbound::repositories::PostgresCredentialStore;
use auth::Authenticator;
use auth::TokenLifetimes;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        kafka_brokers = %config.kafka.brokers,
        kafka_topic = %config.kafka.topic,
        smtp_host = %config.smtp.host,
        access_token_hours = config.jwt.expiration_hours,
        reset_token_minutes = config.jwt.reset_expiration_minutes,
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

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        TokenLifetimes {
            access: Duration::hours(config.jwt.expiration_hours),
            password_reset: Duration::minutes(config.jwt.reset_expiration_minutes),
        },
    ));
    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool));
    let event_producer = Arc::new(KafkaEventProducer::new(&config.kafka)?);
    let notifier = Arc::new(SmtpNotifier::new(&config.smtp)?);
    let reset_ledger = Arc::new(InMemoryResetTokenLedger::new());

    let authentication_service = Arc::new(AuthenticationService::new(
        Arc::clone(&credential_store),
        Arc::clone(&event_producer),
        Arc::clone(&authenticator),
    ));
    let password_reset_flow = Arc::new(PasswordResetFlow::new(
        credential_store,
        notifier,
        event_producer,
        reset_ledger,
        Arc::clone(&authenticator),
        config.reset.link_base_url.clone(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        authentication_service,
        password_reset_flow,
        authenticator,
        Arc::new(SystemClock),
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
