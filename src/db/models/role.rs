//! Role identifiers.

use serde::{Deserialize, Serialize};

/// Foreign reference into the `roles` table.
///
/// Ids are compared by value; the seeded rows are [`RoleId::ADMIN`] and
/// [`RoleId::MEMBER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RoleId(pub i64);

impl RoleId {
    pub const ADMIN: RoleId = RoleId(1);
    pub const MEMBER: RoleId = RoleId(2);

    pub fn is_admin(&self) -> bool {
        *self == Self::ADMIN
    }

    /// Treat an absent or zero role as the default member role
    pub fn or_default(role: Option<RoleId>) -> RoleId {
        match role {
            Some(RoleId(0)) | None => RoleId::default(),
            Some(role) => role,
        }
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::MEMBER
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            RoleId::ADMIN => write!(f, "admin"),
            RoleId::MEMBER => write!(f, "member"),
            RoleId(other) => write!(f, "role:{}", other),
        }
    }
}
