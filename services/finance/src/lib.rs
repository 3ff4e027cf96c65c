//! Personal finance tracking: users and their income/expense entries.
//!
//! Services take their repository by constructor parameter, so the same
//! business rules run against PostgreSQL ([`state::AppState`]) or the
//! in-memory stores in [`repositories::memory`].
//!
//! ```rust,no_run
//! use finance::models::{Entry, EntryStatus, EntryType, Registration};
//! use finance::repositories::{InMemoryEntryRepository, InMemoryUserRepository};
//! use finance::services::{EntryService, UserService};
//! use rust_decimal::Decimal;
//!
//! # async fn demo() -> Result<(), finance::error::ServiceError> {
//! let users = UserService::new(InMemoryUserRepository::new());
//! let entries = EntryService::new(InMemoryEntryRepository::new());
//!
//! let user = users
//!     .register(Registration {
//!         name: "Maria".to_string(),
//!         email: "maria@email.com".to_string(),
//!         password: "senha".to_string(),
//!     })
//!     .await?;
//!
//! let mut salary = entries
//!     .save(Entry {
//!         description: Some("Salário".to_string()),
//!         month: Some(1),
//!         year: Some(2024),
//!         user_id: Some(user.id),
//!         amount: Some(Decimal::new(3500, 0)),
//!         entry_type: Some(EntryType::Income),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! entries.update_status(&mut salary, EntryStatus::Settled).await?;
//! assert_eq!(entries.net_balance(user.id).await?, Decimal::new(3500, 0));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod password;
pub mod repositories;
pub mod services;
pub mod state;
pub mod validation;

pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
