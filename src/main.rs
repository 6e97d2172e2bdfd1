use std::error::Error;
use std::sync::Arc;

use student_portal::adapters::auth::Argon2PasswordHasher;
use student_portal::adapters::http::middleware::SessionCookie;
use student_portal::adapters::http::portal::{portal_router, Pages, PortalAppState};
use student_portal::adapters::postgres::{
    self, PostgresStudentProfileRepository, PostgresUserRepository,
};
use student_portal::adapters::sessions::{InMemorySessionStore, RedisSessionStore};
use student_portal::config::{AppConfig, SessionBackend, SessionConfig};
use student_portal::ports::SessionStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;

    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        "Starting student portal"
    );

    tracing::info!("Connecting to database...");
    let pool = postgres::connect(&config.database).await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        postgres::run_migrations(&pool).await?;
    }

    let sessions = session_store(&config).await?;
    let state = PortalAppState::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresStudentProfileRepository::new(pool)),
        sessions,
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(Pages::new()?),
        session_cookie(&config.session),
    );

    let app = portal_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn session_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>, Box<dyn Error>> {
    let ttl = config.session.ttl();

    match (&config.session.backend, &config.redis) {
        (SessionBackend::Redis, Some(redis_config)) => {
            tracing::info!("Connecting to Redis session store...");
            let client = redis::Client::open(redis_config.url.as_str())?;
            let conn =
                tokio::time::timeout(redis_config.timeout(), client.get_multiplexed_tokio_connection())
                    .await??;
            Ok(Arc::new(RedisSessionStore::new(conn, ttl)))
        }
        (SessionBackend::Redis, None) => {
            Err("redis session backend selected without redis config".into())
        }
        (SessionBackend::Memory, _) => {
            tracing::warn!("Using in-memory sessions; logins will not survive a restart");
            let store = InMemorySessionStore::new(ttl);
            spawn_session_purge(store.clone(), ttl);
            Ok(Arc::new(store))
        }
    }
}

/// Drops expired in-memory sessions nobody came back for.
fn spawn_session_purge(store: InMemorySessionStore, ttl: std::time::Duration) {
    let period = ttl.min(std::time::Duration::from_secs(3600));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            store.purge_expired().await;
        }
    });
}

fn session_cookie(config: &SessionConfig) -> SessionCookie {
    SessionCookie::new(config.cookie_name.clone(), config.ttl(), config.secure_cookie)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
