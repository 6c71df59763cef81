use anyhow::{Context, Result};

use cityinfo_api::{routes, AppState};
use cityinfo_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    cityinfo_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    let addr = config.server.socket_addr()?;

    let state = AppState::from_config(&config).context("Failed to build upstream client")?;
    tracing::info!("Using upstream API at {}", state.service.upstream_base_url());

    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown signal received");
        })
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("CityInfo listening on http://{}", bound);
    server.await;

    tracing::info!("CityInfo shut down");
    Ok(())
}
