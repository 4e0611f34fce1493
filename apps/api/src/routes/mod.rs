pub mod health;

use axum::{routing::get, Router};

use crate::banks::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/banks",
            get(handlers::handle_list_banks).post(handlers::handle_create_bank),
        )
        .route("/api/v1/banks/stats", get(handlers::handle_dashboard_stats))
        .route(
            "/api/v1/banks/:id",
            get(handlers::handle_get_bank)
                .put(handlers::handle_update_bank)
                .delete(handlers::handle_delete_bank),
        )
        .route("/api/v1/banks/:id/export", get(handlers::handle_export_bank))
        .with_state(state)
}
