//! Application state wiring repositories into services

use sqlx::PgPool;

use crate::repositories::{PgEntryRepository, PgUserRepository};
use crate::services::{EntryService, UserService};

/// Services backed by PostgreSQL, built from one shared pool
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_service: UserService<PgUserRepository>,
    pub entry_service: EntryService<PgEntryRepository>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            user_service: UserService::new(PgUserRepository::new(pool.clone())),
            entry_service: EntryService::new(PgEntryRepository::new(pool.clone())),
            db_pool: pool,
        }
    }
}
