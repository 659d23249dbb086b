mod account;
mod app;
mod auth;
mod config;
mod db;
mod error;
mod forms;
mod handlers;
mod i18n;
mod notifications;
mod response;
mod state;
#[cfg(test)]
mod test_support;
mod validation;

use std::sync::Arc;

use account::permissions::PermissionRegistry;
use app::build_router;
use config::Config;
use db::store::PgStore;
use notifications::LogMailer;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Si RUST_LOG n'est pas défini, utiliser ces règles par défaut
        tracing_subscriber::EnvFilter::new(
            "info,account_manager=debug,hyper_util=warn,tower_http=info",
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// ----------------- Main -----------------

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    setup_logging();
    tracing::info!("Starting account-manager...");

    let config = Config::from_env()?;
    tracing::debug!(production = config.is_production(), "Configuration ready");
    let pool = db::connection::create_pool(&config.database_url, config.db_pool_size)?;
    let store = Arc::new(PgStore::new(pool));
    let registry = PermissionRegistry::load(config.permissions_file.as_deref())?;

    let state = AppState::new(
        &config,
        store.clone(),
        store.clone(),
        store,
        Arc::new(LogMailer),
        registry,
    );
    let app = build_router(state);

    if std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok() {
        tracing::info!("Running in Lambda mode");
        lambda_http::run(app).await
    } else {
        tracing::info!("Running in local HTTP server mode");
        let addr = format!("{}:{}", config.server_host, config.server_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
