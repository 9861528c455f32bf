use crate::application_port::SessionError;
use crate::domain_model::{AccessToken, RawRoleStatus, RefreshGrant, RefreshToken};

/// Outbound calls the session core delegates to the HTTP layer.
///
/// Authorization failures must come back as `SessionError::Unauthorized` so
/// the orchestrator can tell an expired credential apart from a network
/// fault without inspecting message text.
#[async_trait::async_trait]
pub trait RoleTransport: Send + Sync {
    async fn fetch_role_status(
        &self,
        access: &AccessToken,
    ) -> Result<RawRoleStatus, SessionError>;

    async fn refresh_token(&self, refresh: &RefreshToken) -> Result<RefreshGrant, SessionError>;
}
