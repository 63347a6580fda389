use std::sync::Arc;
use std::time::Duration;

use jobsearch_backend::{
    config::{get_config, init_config, LogFormat},
    database::{pool::create_pool, run_migrations},
    routes,
    utils::time::SystemClock,
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;
    init_tracing(config.log_format);

    let pool = create_pool().await?;
    run_migrations(&pool).await?;

    let state = AppState::new(pool, Arc::new(SystemClock));
    let app = routes::router(state, Duration::from_secs(config.request_timeout_secs));

    let listener = TcpListener::bind(&config.server_address).await?;
    info!(address = %config.server_address, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
