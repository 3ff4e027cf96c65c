//! In-process repositories
//!
//! Both stores keep rows in a `BTreeMap` behind a tokio `RwLock` and hand out
//! ids from a shared counter. Clones share the same underlying data.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::{EntryRepository, UserRepository};
use crate::models::{Entry, EntryStatus, EntryType, NewUser, User};

/// In-memory user store
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn save(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(DatabaseError::Conflict(format!(
                "email {} already stored",
                new_user.email
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }
}

/// In-memory entry store
#[derive(Clone, Default)]
pub struct InMemoryEntryRepository {
    entries: Arc<RwLock<BTreeMap<i64, Entry>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn save(&self, entry: &Entry) -> DatabaseResult<Entry> {
        let mut entries = self.entries.write().await;

        let mut stored = entry.clone();
        let id = match entry.id {
            Some(id) => {
                let Some(existing) = entries.get(&id) else {
                    return Err(DatabaseError::NotFound(format!("entry {}", id)));
                };
                if stored.registered_on.is_none() {
                    stored.registered_on = existing.registered_on;
                }
                id
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                stored.id = Some(id);
                if stored.registered_on.is_none() {
                    stored.registered_on = Some(Utc::now().date_naive());
                }
                id
            }
        };
        entries.insert(id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Entry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).cloned())
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Entry>> {
        let entries = self.entries.read().await;
        Ok(entries.values().cloned().collect())
    }

    async fn find_by_filter(&self, filter: &Entry) -> DatabaseResult<Vec<Entry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(&id).is_some())
    }

    async fn balance_by_user_type_and_status(
        &self,
        user_id: i64,
        entry_type: EntryType,
        status: EntryStatus,
    ) -> DatabaseResult<Option<Decimal>> {
        let entries = self.entries.read().await;
        let sum = entries
            .values()
            .filter(|e| {
                e.user_id == Some(user_id)
                    && e.entry_type == Some(entry_type)
                    && e.status == Some(status)
            })
            .filter_map(|e| e.amount)
            .fold(None, |acc: Option<Decimal>, amount| {
                Some(acc.unwrap_or_default() + amount)
            });

        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "usuario".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_exists_by_email() {
        let repository = InMemoryUserRepository::new();
        repository.save(&new_user("usuario@email.com")).await.unwrap();

        assert!(repository.exists_by_email("usuario@email.com").await.unwrap());
        assert!(!repository.exists_by_email("outro@email.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repository = InMemoryUserRepository::new();
        repository.save(&new_user("usuario@email.com")).await.unwrap();

        let err = repository
            .save(&new_user("usuario@email.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_entry_ids_are_generated() {
        let repository = InMemoryEntryRepository::new();

        let first = repository.save(&Entry::default()).await.unwrap();
        let second = repository.save(&Entry::default()).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(first.registered_on.is_some());
    }

    #[tokio::test]
    async fn test_update_of_missing_entry() {
        let repository = InMemoryEntryRepository::new();
        let ghost = Entry {
            id: Some(99),
            ..Default::default()
        };

        let err = repository.save(&ghost).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_balance_without_matches_is_none() {
        let repository = InMemoryEntryRepository::new();
        repository
            .save(&Entry {
                user_id: Some(1),
                amount: Some(Decimal::TEN),
                entry_type: Some(EntryType::Income),
                status: Some(EntryStatus::Pending),
                ..Default::default()
            })
            .await
            .unwrap();

        let balance = repository
            .balance_by_user_type_and_status(1, EntryType::Income, EntryStatus::Settled)
            .await
            .unwrap();
        assert_eq!(balance, None);
    }
}
