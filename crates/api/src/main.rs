use std::sync::Arc;

use anyhow::Context;

use invdash_api::app::{self, services::AppServices};
use invdash_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    invdash_observability::init();

    let config = ApiConfig::from_env();
    tracing::info!(
        bind_addr = %config.bind_addr,
        data_path = %config.data_path.display(),
        load_on_startup = config.load_on_startup,
        "starting inventory dashboard api"
    );

    let services = Arc::new(AppServices::new(&config));
    if config.load_on_startup {
        services.load_on_startup().await;
    }

    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received ctrl-c, shutting down"),
        Err(e) => {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    }
}
