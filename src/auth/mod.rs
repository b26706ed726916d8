//! Credential primitives: password hashing and bearer tokens.

mod password;
mod token;

pub use password::{hash_password, verify_password};
pub use token::{parse_bearer, Claims, Identity, TokenService};
