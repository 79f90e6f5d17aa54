use std::{net::SocketAddr, sync::Arc};

use matchday::{
    dashboard_router, init_logging, log_app_bind, log_app_start, log_provider_selected,
    logging_config_from_env, provider_config_from_env, MockSportsDataProvider, SportsDataProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_cfg = logging_config_from_env();
    init_logging(&logging_cfg)?;
    log_app_start(&logging_cfg);

    let addr: SocketAddr = std::env::var("MATCHDAY_DASHBOARD_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;

    let provider_cfg = provider_config_from_env();
    let provider = MockSportsDataProvider::from_config(&provider_cfg)?;
    log_provider_selected(
        "mock",
        provider_cfg.seed,
        provider.latency().slowest().as_millis() as u64,
    );

    let provider: Arc<dyn SportsDataProvider> = Arc::new(provider);
    let app = dashboard_router(provider);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    log_app_bind(bound_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
