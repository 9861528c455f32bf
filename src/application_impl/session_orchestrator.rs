use crate::application_impl::TokenStore;
use crate::application_port::{SessionError, SessionService};
use crate::domain_model::{
    AccessToken, RefreshToken, RoleApproval, SessionState, TokenPair, normalize,
};
use crate::domain_port::{ClientStorage, Navigator, RoleTransport};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

const GATE_IDLE: u8 = 0;
const GATE_RUNNING: u8 = 1;
const GATE_SETTLED: u8 = 2;

/// Initialization latch: idle -> running -> settled. `try_begin` admits
/// exactly one caller; logout is the only way back to idle.
struct InitGate(AtomicU8);

impl InitGate {
    fn new() -> Self {
        InitGate(AtomicU8::new(GATE_IDLE))
    }

    fn try_begin(&self) -> bool {
        self.0
            .compare_exchange(GATE_IDLE, GATE_RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn settle(&self) {
        self.0.store(GATE_SETTLED, Ordering::Release);
    }

    fn reset(&self) {
        self.0.store(GATE_IDLE, Ordering::Release);
    }
}

/// Holds the session record and coordinates the token store with the
/// role-status and refresh endpoints. Consumers read snapshots or subscribe;
/// state changes only through the `SessionService` operations.
pub struct SessionOrchestrator {
    tokens: TokenStore,
    transport: Arc<dyn RoleTransport>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
    init_gate: InitGate,
}

impl SessionOrchestrator {
    pub fn new(
        storage: Arc<dyn ClientStorage>,
        transport: Arc<dyn RoleTransport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        SessionOrchestrator {
            tokens: TokenStore::new(storage),
            transport,
            navigator,
            state,
            init_gate: InitGate::new(),
        }
    }

    async fn fetch_and_record(&self, access: &AccessToken) -> Result<RoleApproval, SessionError> {
        let raw = self.transport.fetch_role_status(access).await?;
        let approval = normalize(&raw);
        self.state.send_modify(|s| {
            s.role_status = Some(approval.status);
            s.role = approval.role;
            s.checked_at = Some(Utc::now());
        });
        Ok(approval)
    }

    /// One fetch, with at most one refresh-and-retry on a rejected
    /// credential. A second rejection propagates as-is.
    async fn status_with_recovery(
        &self,
        access: &AccessToken,
    ) -> Result<RoleApproval, SessionError> {
        match self.fetch_and_record(access).await {
            Err(cause) if cause.is_authorization_failure() => {
                let Some(refresh) = self.tokens.get().refresh else {
                    return Err(cause);
                };
                info!("access token rejected, attempting refresh");
                let fresh = self.refresh_access_token(&refresh).await?;
                self.fetch_and_record(&fresh).await
            }
            other => other,
        }
    }

    fn clear_session(&self) {
        self.tokens.clear();
        self.state.send_modify(|s| *s = s.cleared());
    }
}

#[async_trait::async_trait]
impl SessionService for SessionOrchestrator {
    async fn initialize(&self) {
        if !self.init_gate.try_begin() {
            debug!("initialize already ran or is in flight, ignoring");
            return;
        }
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.tokens.get().access {
            None => {
                debug!("no stored access token, session starts logged out");
            }
            Some(access) => match self.status_with_recovery(&access).await {
                Ok(approval) => {
                    self.state.send_modify(|s| s.is_authenticated = true);
                    info!(status = ?approval.status, role = ?approval.role, "session restored");
                }
                Err(error) => {
                    warn!("session restore failed, clearing: {error}");
                    self.clear_session();
                    let message = error.to_string();
                    self.state.send_modify(|s| s.error = Some(message));
                }
            },
        }

        self.state.send_modify(|s| {
            s.loading = false;
            s.initialized = true;
        });
        self.init_gate.settle();
    }

    async fn check_status(&self, access: &AccessToken) -> Result<RoleApproval, SessionError> {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.status_with_recovery(access).await;
        match &result {
            Ok(_) => self.state.send_modify(|s| s.loading = false),
            Err(error) => {
                // A rejected credential or failed refresh ends the session; a
                // plain transport fault leaves it for the caller to retry.
                if !matches!(error, SessionError::Transport(_)) {
                    self.clear_session();
                }
                let message = error.to_string();
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(message);
                });
            }
        }
        result
    }

    async fn refresh_access_token(
        &self,
        refresh: &RefreshToken,
    ) -> Result<AccessToken, SessionError> {
        match self.transport.refresh_token(refresh).await {
            Ok(grant) => {
                let pair = TokenPair::from(grant);
                self.tokens.set(&pair);
                debug!("access token refreshed");
                Ok(pair.access)
            }
            Err(cause) => {
                warn!("refresh failed, terminating session: {cause}");
                let error = SessionError::RefreshRejected(cause.to_string());
                self.clear_session();
                let message = error.to_string();
                self.state.send_modify(|s| s.error = Some(message));
                Err(error)
            }
        }
    }

    fn logout(&self) {
        self.tokens.clear();
        self.state.send_modify(|s| *s = SessionState::default());
        self.init_gate.reset();
        self.navigator.to_login();
        info!("session logged out");
    }

    fn token(&self) -> Option<AccessToken> {
        self.tokens.get().access
    }

    fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}
