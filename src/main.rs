use daily_journal::{router, AppState, Config, RecordStore};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let store = RecordStore::open(&config.data_dir).await?;

    info!(data_dir = %config.data_dir.display(), "record storage ready");
    info!(static_dir = %config.static_dir.display(), template_dir = %config.template_dir.display(), "serving views");

    let state = AppState::new(store, config.template_dir.clone());
    let app = router(state, &config.static_dir);

    info!("listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
