use crate::banks::BankService;
use crate::layout::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Bank collection operations over the configured `BankStore`.
    pub banks: BankService,
    /// Page geometry and fonts for PDF export.
    pub page_config: PageConfig,
}
