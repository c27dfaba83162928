use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use stockroom_core::tracing::init_tracing;
use stockroom_inventory::config::InventoryConfig;
use stockroom_inventory::router::build_router;
use stockroom_inventory::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = InventoryConfig::from_env()?;
    info!(?config, "configuration loaded");

    let sessions = config.session_manager()?;
    let db = Database::connect(config.connect_options())
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db: Arc::new(db),
        sessions: Arc::new(sessions),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("inventory service listening on {addr}");
    axum::serve(listener, router).await.context("server error")
}
