use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use class_schedule::shell::config::ShellConfig;
use class_schedule::shell::http::router;
use class_schedule::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = ShellConfig::from_env()?;

    // In-memory deps for now
    let state = AppState::in_memory(&config.schedule);
    let app = router(state);

    info!(
        addr = %config.bind_addr,
        interval_minutes = config.schedule.interval_minutes,
        policy = ?config.schedule.conflict_policy,
        "class schedule service listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
