use std::net::{Ipv4Addr, SocketAddr};

use freelinkd_server::config::AppConfig;
use freelinkd_server::database::client::{Database, DbConfig};
use freelinkd_server::init;
use freelinkd_server::middleware::error::{AppError, AppResult};
use freelinkd_server::middleware::mw_ctx;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!("uploads max mb = {}", config.upload_file_size_max_mb);
    info!("project transitions = {}", config.transition_policy);

    let db = Database::connect(DbConfig {
        url: &config.db_url,
        database: &config.db_database,
        namespace: &config.db_namespace,
        password: config.db_password.as_deref(),
        username: config.db_username.as_deref(),
    })
    .await?;
    db.run_migrations().await?;

    let ctx_state = mw_ctx::create_ctx_state(db, &config);
    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server_port));
    info!("->> LISTENING on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Generic {
            description: format!("bind {addr} - {e}"),
        })?;

    axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Generic {
            description: format!("server - {e}"),
        })?;

    match std::sync::Arc::try_unwrap(ctx_state) {
        Ok(state) => state.db.close().await?,
        Err(_) => info!("->> state still shared, skipping DB close"),
    }
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("->> shutdown signal received"),
        Err(e) => {
            error!("ctrl-c handler failed: {e}");
            std::future::pending::<()>().await
        }
    }
}
