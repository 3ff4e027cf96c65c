//! Finance service models

pub mod entry;
pub mod user;

pub use entry::{Entry, EntryStatus, EntryType, ParseEnumError};
pub use user::{NewUser, Registration, User};
