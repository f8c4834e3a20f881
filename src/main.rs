use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use xp_dashboard::engine::notice::LogNotifier;
use xp_dashboard::{clock, load_data, router, AppState, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env();
    if let Some(parent) = settings.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&settings.data_path).await;
    let state = AppState::new(settings.data_path.clone(), data, settings.engine);
    clock::roll_over_to(&state, clock::today(), &mut LogNotifier)
        .await
        .map_err(|err| err.message)?;
    clock::spawn_day_watcher(state.clone(), settings.day_check_interval);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!(
        relock_policy = ?settings.engine.relock_policy,
        data_path = %settings.data_path.display(),
        "listening on http://{addr}"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
