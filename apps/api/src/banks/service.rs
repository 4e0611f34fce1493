//! Bank collection operations used by the dashboard and editor.
//!
//! Every mutation is load-all → modify → save-all under one lock, so two
//! concurrent edits cannot overwrite each other's blob.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::banks::seed::sample_banks;
use crate::banks::store::BankStore;
use crate::banks::validation::build_bank;
use crate::errors::AppError;
use crate::models::bank::{BankDraft, BankSummary, QuestionBank};

/// Dashboard headline numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_banks: usize,
    pub total_questions: usize,
    pub subjects_covered: usize,
}

#[derive(Clone)]
pub struct BankService {
    store: Arc<dyn BankStore>,
    write_lock: Arc<Mutex<()>>,
}

impl BankService {
    pub fn new(store: Arc<dyn BankStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Banks whose name or subject contains `query` (case-insensitive).
    /// A missing or blank query lists everything.
    pub async fn list_banks(&self, query: Option<&str>) -> Result<Vec<BankSummary>, AppError> {
        let banks = self.store.load_all().await?;
        let needle = query.map(str::trim).unwrap_or_default().to_lowercase();

        Ok(banks
            .iter()
            .filter(|bank| {
                needle.is_empty()
                    || bank.name.to_lowercase().contains(&needle)
                    || bank.subject.to_lowercase().contains(&needle)
            })
            .map(QuestionBank::summary)
            .collect())
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let banks = self.store.load_all().await?;
        let subjects: HashSet<&str> = banks.iter().map(|b| b.subject.as_str()).collect();
        Ok(DashboardStats {
            total_banks: banks.len(),
            total_questions: banks.iter().map(QuestionBank::question_count).sum(),
            subjects_covered: subjects.len(),
        })
    }

    pub async fn get_bank(&self, id: &str) -> Result<QuestionBank, AppError> {
        self.store
            .load_all()
            .await?
            .into_iter()
            .find(|bank| bank.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Question bank {id} not found")))
    }

    pub async fn create_bank(&self, draft: BankDraft) -> Result<QuestionBank, AppError> {
        let bank = build_bank(Uuid::new_v4().to_string(), draft)?;

        let _guard = self.write_lock.lock().await;
        let mut banks = self.store.load_all().await?;
        banks.push(bank.clone());
        self.store.save_all(&banks).await?;

        info!(bank_id = %bank.id, questions = bank.question_count(), "Created question bank");
        Ok(bank)
    }

    /// Replaces the bank with id `id` by the validated draft, keeping its
    /// position in the collection.
    pub async fn update_bank(&self, id: &str, draft: BankDraft) -> Result<QuestionBank, AppError> {
        let bank = build_bank(id.to_string(), draft)?;

        let _guard = self.write_lock.lock().await;
        let mut banks = self.store.load_all().await?;
        let slot = banks
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Question bank {id} not found")))?;
        *slot = bank.clone();
        self.store.save_all(&banks).await?;

        info!(bank_id = %bank.id, questions = bank.question_count(), "Updated question bank");
        Ok(bank)
    }

    pub async fn delete_bank(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut banks = self.store.load_all().await?;
        let before = banks.len();
        banks.retain(|bank| bank.id != id);
        if banks.len() == before {
            return Err(AppError::NotFound(format!("Question bank {id} not found")));
        }
        self.store.save_all(&banks).await?;

        info!(bank_id = %id, "Deleted question bank");
        Ok(())
    }

    /// Writes the sample banks when the store holds nothing. Returns whether it seeded.
    pub async fn seed_if_empty(&self) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;
        if !self.store.load_all().await?.is_empty() {
            return Ok(false);
        }
        let samples = sample_banks();
        self.store.save_all(&samples).await?;
        info!(banks = samples.len(), "Seeded sample question banks");
        Ok(true)
    }
}
