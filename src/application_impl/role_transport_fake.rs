use crate::application_port::SessionError;
use crate::domain_model::{AccessToken, RawRoleStatus, RefreshGrant, RefreshToken};
use crate::domain_port::RoleTransport;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// Scriptable transport for tests and demo binaries. Responses are consumed
// in order; an exhausted script answers with a transport failure. Extend to
// simulate more shapes when needed.
pub struct FakeRoleTransport {
    status_script: Mutex<VecDeque<Result<RawRoleStatus, SessionError>>>,
    refresh_script: Mutex<VecDeque<Result<RefreshGrant, SessionError>>>,
    seen_access: Mutex<Vec<AccessToken>>,
    status_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    latency: Option<Duration>,
}

impl FakeRoleTransport {
    pub fn new() -> Self {
        FakeRoleTransport {
            status_script: Mutex::new(VecDeque::new()),
            refresh_script: Mutex::new(VecDeque::new()),
            seen_access: Mutex::new(Vec::new()),
            status_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            latency: None,
        }
    }

    /// Delay every call, to keep one in flight while another arrives.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn push_status(&self, response: Result<RawRoleStatus, SessionError>) {
        self.status_script
            .lock()
            .expect("status script poisoned")
            .push_back(response);
    }

    pub fn push_refresh(&self, response: Result<RefreshGrant, SessionError>) {
        self.refresh_script
            .lock()
            .expect("refresh script poisoned")
            .push_back(response);
    }

    pub fn status_call_count(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_call_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    /// Access tokens presented to the role-status endpoint, in call order.
    pub fn seen_access_tokens(&self) -> Vec<AccessToken> {
        self.seen_access
            .lock()
            .expect("seen-access log poisoned")
            .clone()
    }
}

impl Default for FakeRoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RoleTransport for FakeRoleTransport {
    async fn fetch_role_status(
        &self,
        access: &AccessToken,
    ) -> Result<RawRoleStatus, SessionError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_access
            .lock()
            .expect("seen-access log poisoned")
            .push(access.clone());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.status_script
            .lock()
            .expect("status script poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(SessionError::Transport("role-status script exhausted".into())))
    }

    async fn refresh_token(&self, _refresh: &RefreshToken) -> Result<RefreshGrant, SessionError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.refresh_script
            .lock()
            .expect("refresh script poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(SessionError::Transport("refresh script exhausted".into())))
    }
}
