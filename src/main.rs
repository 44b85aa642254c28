use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use todolist_api::config::Config;
use todolist_api::database::repository::PgTodoListRepository;
use todolist_api::services::TodoListService;
use todolist_api::{app, database, AppState};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so local runs pick up DB_* and JWT_* settings.
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("load config")?;

    let default_filter = if config.app.debug {
        "todolist_api=debug,tower_http=debug"
    } else {
        "todolist_api=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    info!(name = %config.app.name, debug = config.app.debug, "starting");

    let pool = database::connect(&config.database)
        .await
        .context("connect database")?;
    database::migrate(&pool).await.context("run migrations")?;

    let repository = Arc::new(PgTodoListRepository::new(pool.clone()));
    let state = AppState {
        config: Arc::new(config.clone()),
        todo_list_service: TodoListService::new(repository),
    };

    let bind_addr = format!("0.0.0.0:{}", config.app.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("bind {}", bind_addr))?;
    info!(addr = %bind_addr, "http server listening");

    // Shutdown signal fans out to the server (stop accepting, drain) and to
    // the grace timer that bounds the drain.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let mut server_shutdown = shutdown_rx.clone();
    let server = axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = server_shutdown.changed().await;
    })
    .into_future();

    let mut grace_shutdown = shutdown_rx;
    tokio::select! {
        result = server => result.context("http server error")?,
        _ = async {
            let _ = grace_shutdown.changed().await;
            tokio::time::sleep(SHUTDOWN_GRACE).await;
        } => {
            warn!("shutdown grace period elapsed, abandoning in-flight requests");
        }
    }

    pool.close().await;
    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
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
}
