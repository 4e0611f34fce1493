mod banks;
mod config;
mod errors;
mod layout;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::banks::{BankService, BankStore, JsonFileStore};
use crate::config::Config;
use crate::layout::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log filter can honour RUST_LOG from .env
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bank Press v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the bank store
    let store: Arc<dyn BankStore> = Arc::new(JsonFileStore::new(&config.store_path));
    info!("Bank store at {}", config.store_path.display());

    let banks = BankService::new(store);
    if config.seed_sample_banks && banks.seed_if_empty().await? {
        info!("Store was empty, sample banks written");
    }

    // Layout page config (A4, 20mm margins, Helvetica)
    let page_config = default_page_config();
    info!(
        "Layout page config: {}x{}mm, {:?} {}pt body",
        page_config.page_width_mm,
        page_config.page_height_mm,
        page_config.font,
        page_config.body_size_pt
    );

    let state = AppState { banks, page_config };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::new(config.bind_addr, config.port);
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
