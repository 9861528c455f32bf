use crate::domain_model::{AccessToken, RefreshToken, RoleApproval, SessionState};
use tokio::sync::watch;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("credential rejected (HTTP {status})")]
    Unauthorized { status: u16 },
    #[error("refresh rejected: {0}")]
    RefreshRejected(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

impl SessionError {
    /// Classify a raw HTTP failure from an adapter that only observes a
    /// status code and message text.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == 401 {
            SessionError::Unauthorized { status }
        } else {
            SessionError::Transport(message.into())
        }
    }

    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, SessionError::Unauthorized { .. })
    }
}

/// The session surface consumed by page-level components. State is read
/// through snapshots or a watch subscription; every mutation goes through
/// one of the operations below.
#[async_trait::async_trait]
pub trait SessionService: Send + Sync {
    /// One-shot session restore. Concurrent and repeat calls are no-ops;
    /// callers observe the outcome through the shared state.
    async fn initialize(&self);

    /// Fetch and record the current role approval, refreshing the access
    /// token once on an authorization failure.
    async fn check_status(&self, access: &AccessToken) -> Result<RoleApproval, SessionError>;

    /// Exchange the refresh token for a new pair and persist it. A failed
    /// refresh always terminates the session.
    async fn refresh_access_token(
        &self,
        refresh: &RefreshToken,
    ) -> Result<AccessToken, SessionError>;

    /// Clear the session locally and signal navigation to the login
    /// surface. No network call.
    fn logout(&self);

    /// Currently stored access token, without validation or refresh.
    fn token(&self) -> Option<AccessToken>;

    fn snapshot(&self) -> SessionState;

    fn subscribe(&self) -> watch::Receiver<SessionState>;
}
