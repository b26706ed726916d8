//! Registration (event attendance) models.

/// Association between one event and one attending user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRegistration {
    pub event_id: i64,
    pub user_id: i64,
}
