//! Entry lifecycle and balance queries

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Entry, EntryStatus, EntryType};
use crate::repositories::EntryRepository;
use crate::validation::validate_entry;

/// Entry service
#[derive(Clone)]
pub struct EntryService<R> {
    repository: R,
}

impl<R: EntryRepository> EntryService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Check the entry rules; the first violated rule is reported
    pub fn validate(&self, entry: &Entry) -> ServiceResult<()> {
        validate_entry(entry).map_err(ServiceError::business)
    }

    /// Validate and persist a new entry.
    ///
    /// Status defaults to `Pending`; the registration date defaults to today
    /// in the store.
    pub async fn save(&self, mut entry: Entry) -> ServiceResult<Entry> {
        self.validate(&entry)?;
        if entry.status.is_none() {
            entry.status = Some(EntryStatus::Pending);
        }

        let saved = self.repository.save(&entry).await?;
        info!("Entry saved: {:?}", saved.id);
        Ok(saved)
    }

    /// Overwrite a persisted entry. The identifier is checked before anything
    /// else, so an unsaved entry never reaches the store.
    pub async fn update(&self, entry: Entry) -> ServiceResult<Entry> {
        if entry.id.is_none() {
            return Err(ServiceError::MissingIdentifier);
        }
        self.validate(&entry)?;

        Ok(self.repository.save(&entry).await?)
    }

    pub async fn delete(&self, entry: &Entry) -> ServiceResult<()> {
        let id = entry.id.ok_or(ServiceError::MissingIdentifier)?;

        if !self.repository.delete(id).await? {
            warn!("Delete requested for missing entry: {}", id);
        }

        Ok(())
    }

    /// Set the status on `entry`, then persist it through [`Self::update`].
    /// The change is only durable if the update succeeds.
    pub async fn update_status(
        &self,
        entry: &mut Entry,
        status: EntryStatus,
    ) -> ServiceResult<Entry> {
        entry.status = Some(status);
        self.update(entry.clone()).await
    }

    /// Entries agreeing with every attribute set on `filter`
    pub async fn search(&self, filter: &Entry) -> ServiceResult<Vec<Entry>> {
        Ok(self.repository.find_by_filter(filter).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<Option<Entry>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Sum of one user's amounts for a type and status, zero when nothing matches
    pub async fn balance(
        &self,
        user_id: i64,
        entry_type: EntryType,
        status: EntryStatus,
    ) -> ServiceResult<Decimal> {
        let sum = self
            .repository
            .balance_by_user_type_and_status(user_id, entry_type, status)
            .await?;

        Ok(sum.unwrap_or(Decimal::ZERO))
    }

    /// Settled income minus settled expenses
    pub async fn net_balance(&self, user_id: i64) -> ServiceResult<Decimal> {
        let income = self
            .balance(user_id, EntryType::Income, EntryStatus::Settled)
            .await?;
        let expenses = self
            .balance(user_id, EntryType::Expense, EntryStatus::Settled)
            .await?;

        Ok(income - expenses)
    }
}
