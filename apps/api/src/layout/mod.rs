// Document layout and export engine.
// Paginates a question bank onto A4 pages and serializes the result as PDF.
// Layout is CPU-bound: async callers use export::export_async (spawn_blocking).

pub mod document;
pub mod export;
pub mod font_metrics;
pub mod page_config;
pub mod paginator;
pub mod pdf;

// Re-export the public API consumed by handlers and main.
pub use export::export_async;
pub use page_config::{default_page_config, PageConfig};
