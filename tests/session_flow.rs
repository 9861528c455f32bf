//! End-to-end session journeys through the public surface only.

use std::sync::Arc;
use vitrine::application_impl::{
    FakeRoleTransport, RecordingNavigator, SessionOrchestrator, TokenStore,
};
use vitrine::application_port::{SessionError, SessionService};
use vitrine::domain_model::{AccessToken, RefreshToken, RoleStatus, TokenPair};
use vitrine::infra_memory::MemoryClientStorage;

fn scripted(transport: FakeRoleTransport) -> (SessionOrchestrator, TokenStore, Arc<FakeRoleTransport>, Arc<RecordingNavigator>) {
    let storage = Arc::new(MemoryClientStorage::new());
    let transport = Arc::new(transport);
    let navigator = Arc::new(RecordingNavigator::new());
    let session = SessionOrchestrator::new(storage.clone(), transport.clone(), navigator.clone());
    (session, TokenStore::new(storage), transport, navigator)
}

fn seeded_pair() -> TokenPair {
    TokenPair {
        access: AccessToken("seed-access".into()),
        refresh: RefreshToken("seed-refresh".into()),
    }
}

#[tokio::test]
async fn fresh_client_initializes_logged_out_and_offline() {
    let (session, _tokens, transport, _) = scripted(FakeRoleTransport::new());

    session.initialize().await;

    let state = session.snapshot();
    assert!(state.initialized);
    assert!(!state.is_authenticated);
    assert_eq!(state.error, None);
    assert_eq!(transport.status_call_count(), 0);
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn returning_client_restores_then_logs_out() {
    let t = FakeRoleTransport::new();
    t.push_status(Ok(serde_json::from_value(serde_json::json!({
        "status": "pending",
        "role": "seller",
    }))
    .unwrap()));
    let (session, tokens, _, navigator) = scripted(t);
    tokens.set(&seeded_pair());

    session.initialize().await;
    let state = session.snapshot();
    assert!(state.is_authenticated);
    assert_eq!(state.role_status, Some(RoleStatus::Pending));

    session.logout();
    assert_eq!(session.token(), None);
    assert_eq!(navigator.login_signals(), 1);
    assert!(!session.snapshot().initialized);

    // A new initialization cycle after logout settles logged out.
    session.initialize().await;
    let state = session.snapshot();
    assert!(state.initialized);
    assert!(!state.is_authenticated);
}

#[tokio::test]
async fn expired_session_is_refreshed_transparently_on_restore() {
    let t = FakeRoleTransport::new();
    t.push_status(Err(SessionError::Unauthorized { status: 401 }));
    t.push_refresh(Ok(serde_json::from_value(serde_json::json!({
        "access": "rotated-access",
        "refresh": "rotated-refresh",
    }))
    .unwrap()));
    t.push_status(Ok(serde_json::from_value(serde_json::json!({
        "approved": true,
    }))
    .unwrap()));
    let (session, tokens, transport, _) = scripted(t);
    tokens.set(&seeded_pair());

    session.initialize().await;

    let state = session.snapshot();
    assert!(state.is_authenticated);
    assert_eq!(state.role_status, Some(RoleStatus::Approved));
    assert_eq!(session.token(), Some(AccessToken("rotated-access".into())));
    assert_eq!(transport.refresh_call_count(), 1);
    assert_eq!(transport.status_call_count(), 2);
}

#[tokio::test]
async fn dead_refresh_token_ends_in_a_cleared_errored_session() {
    let t = FakeRoleTransport::new();
    t.push_status(Err(SessionError::Unauthorized { status: 401 }));
    t.push_refresh(Err(SessionError::Unauthorized { status: 401 }));
    let (session, tokens, _, _) = scripted(t);
    tokens.set(&seeded_pair());

    session.initialize().await;

    let state = session.snapshot();
    assert!(state.initialized);
    assert!(!state.is_authenticated);
    assert!(state.error.is_some());
    assert!(!state.loading);
    assert_eq!(session.token(), None);
}
