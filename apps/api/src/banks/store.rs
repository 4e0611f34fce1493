//! Persistence of the bank collection as a single blob.
//!
//! The collection is always read and written whole: `load_all` returns every
//! bank, `save_all` replaces every bank. There is no partial update.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::bank::QuestionBank;

/// Load-all / save-all contract. Carried in `AppState` as `Arc<dyn BankStore>`.
#[async_trait]
pub trait BankStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<QuestionBank>, AppError>;

    async fn save_all(&self, banks: &[QuestionBank]) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// JsonFileStore
// ────────────────────────────────────────────────────────────────────────────

/// Stores the collection as one JSON array in a file.
///
/// A missing file reads as an empty collection. Writes go to a temp file in
/// the same directory which is then renamed over the target, so readers see
/// either the old or the new blob.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BankStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<QuestionBank>, AppError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Bank store file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let banks: Vec<QuestionBank> = serde_json::from_slice(&raw)?;
        debug!(path = %self.path.display(), banks = banks.len(), "Loaded bank collection");
        Ok(banks)
    }

    async fn save_all(&self, banks: &[QuestionBank]) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(banks)?;
        let path = self.path.clone();
        let count = banks.len();

        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in save_all: {e}"))
            })??;

        info!(path = %self.path.display(), banks = count, "Saved bank collection");
        Ok(())
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryStore
// ────────────────────────────────────────────────────────────────────────────

/// In-process store backing the service and router tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    banks: tokio::sync::Mutex<Vec<QuestionBank>>,
}

#[cfg(test)]
#[async_trait]
impl BankStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<QuestionBank>, AppError> {
        Ok(self.banks.lock().await.clone())
    }

    async fn save_all(&self, banks: &[QuestionBank]) -> Result<(), AppError> {
        *self.banks.lock().await = banks.to_vec();
        Ok(())
    }
}
