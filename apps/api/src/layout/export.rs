//! Export entry points: bank → laid-out document → PDF artifact.

use tracing::info;

use crate::errors::AppError;
use crate::layout::font_metrics::get_metrics;
use crate::layout::page_config::PageConfig;
use crate::layout::paginator::{document_title, layout_bank};
use crate::layout::pdf::render_pdf;
use crate::models::bank::QuestionBank;

/// A finished, downloadable document.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// `{bank name}.pdf`, or `Unnamed Bank.pdf` when the name is blank.
    pub file_name: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

/// File name the artifact is saved under.
pub fn export_file_name(bank: &QuestionBank) -> String {
    format!("{}.pdf", document_title(bank))
}

/// Exports `bank` as a PDF.
///
/// With no bank selected this is a no-op and returns `None`. The bank is never
/// validated or mutated here.
pub fn export(bank: Option<&QuestionBank>, config: &PageConfig) -> Option<ExportedDocument> {
    let bank = bank?;

    let document = layout_bank(bank, config, get_metrics(&config.font));
    let bytes = render_pdf(&document, config.font);
    let exported = ExportedDocument {
        file_name: export_file_name(bank),
        page_count: document.page_count(),
        bytes,
    };

    info!(
        bank_id = %bank.id,
        pages = exported.page_count,
        size_bytes = exported.bytes.len(),
        file_name = %exported.file_name,
        "Exported question bank"
    );

    Some(exported)
}

/// Runs `export` on the blocking pool so the async executor is never held
/// by layout or serialization.
pub async fn export_async(
    bank: Option<QuestionBank>,
    config: &PageConfig,
) -> Result<Option<ExportedDocument>, AppError> {
    let cfg = config.clone();
    tokio::task::spawn_blocking(move || export(bank.as_ref(), &cfg))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))
}
