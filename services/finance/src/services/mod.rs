//! Business services
//!
//! Each service owns its repository, handed in at construction.

pub mod entry;
pub mod user;

pub use entry::EntryService;
pub use user::UserService;
