//! Database models split into domain-specific modules.

pub mod event;
pub mod registration;
pub mod role;
pub mod user;

pub use event::*;
pub use registration::*;
pub use role::*;
pub use user::*;
