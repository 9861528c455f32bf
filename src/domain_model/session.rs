use crate::domain_model::{Role, RoleStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Session record distributed to consumers as read-only snapshots. Mutation
/// happens only through the orchestrator's operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub role: Option<Role>,
    pub role_status: Option<RoleStatus>,
    pub loading: bool,
    pub error: Option<String>,
    pub initialized: bool,
    pub checked_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Logged-out baseline that keeps the `initialized` latch as-is.
    pub fn cleared(&self) -> Self {
        SessionState {
            initialized: self.initialized,
            ..SessionState::default()
        }
    }
}
