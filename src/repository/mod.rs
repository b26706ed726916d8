//! Store access: one trait per aggregate, with SQLite implementations.
//!
//! Implementations classify the constraint violations they know about
//! (duplicate keys, missing rows, dangling references) into [`AppError`]
//! variants and pass everything else through as [`AppError::Database`].
//! Every read filters out soft-deleted rows.
//!
//! [`AppError`]: crate::error::AppError
//! [`AppError::Database`]: crate::error::AppError::Database

mod event;
mod registration;
mod user;

pub use event::{EventRepository, SqliteEventRepository};
pub use registration::{RegistrationRepository, SqliteRegistrationRepository};
pub use user::{SqliteUserRepository, UserRepository};
