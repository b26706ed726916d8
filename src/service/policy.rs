//! Authorization checks against the authenticated identity.
//!
//! A mismatch is always [`AppError::Forbidden`]; the API layer decides how
//! that is rendered on the wire.

use crate::auth::Identity;
use crate::db::Event;
use crate::error::{AppError, AppResult};

pub fn require_admin(identity: &Identity) -> AppResult<()> {
    if identity.role_id.is_admin() {
        Ok(())
    } else {
        tracing::info!(user_id = identity.user_id, "Access denied. Not an admin user");
        Err(AppError::forbidden("Unauthorized"))
    }
}

/// The caller may only address their own user record
pub fn require_self(identity: &Identity, user_id: i64) -> AppResult<()> {
    if identity.user_id == user_id {
        Ok(())
    } else {
        tracing::info!(
            user_id = identity.user_id,
            target_user_id = user_id,
            "Access denied. Not the resource owner"
        );
        Err(AppError::forbidden("Unauthorized"))
    }
}

pub fn require_owner(identity: &Identity, event: &Event) -> AppResult<()> {
    if event.user_id == identity.user_id {
        Ok(())
    } else {
        tracing::info!(
            user_id = identity.user_id,
            event_id = event.id,
            "Access denied. Not the event owner"
        );
        Err(AppError::forbidden("Unauthorized"))
    }
}
