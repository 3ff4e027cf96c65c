//! Shared fixtures for the service tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use common::error::DatabaseResult;
use finance::models::{Entry, EntryStatus, EntryType, NewUser, User};
use finance::repositories::{
    EntryRepository, InMemoryEntryRepository, InMemoryUserRepository, UserRepository,
};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

/// Wraps the in-memory user store and remembers every `save` call
#[derive(Clone, Default)]
pub struct RecordingUserRepository {
    pub inner: InMemoryUserRepository,
    pub saves: Arc<Mutex<Vec<NewUser>>>,
}

impl RecordingUserRepository {
    pub fn save_calls(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for RecordingUserRepository {
    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool> {
        self.inner.exists_by_email(email).await
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        self.inner.find_all().await
    }

    async fn save(&self, new_user: &NewUser) -> DatabaseResult<User> {
        self.saves.lock().unwrap().push(new_user.clone());
        self.inner.save(new_user).await
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        self.inner.delete(id).await
    }
}

/// Wraps the in-memory entry store and remembers every write
#[derive(Clone, Default)]
pub struct RecordingEntryRepository {
    pub inner: InMemoryEntryRepository,
    pub saves: Arc<Mutex<Vec<Entry>>>,
    pub deletes: Arc<Mutex<Vec<i64>>>,
}

impl RecordingEntryRepository {
    pub fn save_calls(&self) -> Vec<Entry> {
        self.saves.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<i64> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        self.saves.lock().unwrap().clear();
        self.deletes.lock().unwrap().clear();
    }
}

#[async_trait]
impl EntryRepository for RecordingEntryRepository {
    async fn save(&self, entry: &Entry) -> DatabaseResult<Entry> {
        self.saves.lock().unwrap().push(entry.clone());
        self.inner.save(entry).await
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Entry>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Entry>> {
        self.inner.find_all().await
    }

    async fn find_by_filter(&self, filter: &Entry) -> DatabaseResult<Vec<Entry>> {
        self.inner.find_by_filter(filter).await
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        self.deletes.lock().unwrap().push(id);
        self.inner.delete(id).await
    }

    async fn balance_by_user_type_and_status(
        &self,
        user_id: i64,
        entry_type: EntryType,
        status: EntryStatus,
    ) -> DatabaseResult<Option<Decimal>> {
        self.inner
            .balance_by_user_type_and_status(user_id, entry_type, status)
            .await
    }
}

/// A valid, not yet persisted entry
pub fn sample_entry() -> Entry {
    Entry {
        id: None,
        description: Some("lancamento qualquer".to_string()),
        month: Some(1),
        year: Some(2019),
        user_id: Some(1),
        amount: Some(Decimal::TEN),
        registered_on: NaiveDate::from_ymd_opt(2019, 1, 15),
        entry_type: Some(EntryType::Income),
        status: Some(EntryStatus::Pending),
    }
}
