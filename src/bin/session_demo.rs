//! Manual walkthrough of the session core against scripted collaborators.
//!
//! The stored access token is rejected on first use, so the log shows the
//! whole restore path: read tokens, role-status rejection, refresh, retried
//! fetch, settled state.
//!
//! $ cargo run --bin session_demo -- --settings=settings/dev.toml

use std::sync::Arc;
use vitrine::application_impl::{FakeRoleTransport, RecordingNavigator, SessionOrchestrator, TokenStore};
use vitrine::application_port::{SessionError, SessionService};
use vitrine::domain_model::{AccessToken, RefreshToken, TokenPair};
use vitrine::domain_port::ClientStorage;
use vitrine::infra_fs::FsClientStorage;
use vitrine::infra_memory::MemoryClientStorage;
use vitrine::logger::Logger;
use vitrine::settings::{Cli, Parser, parse_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = Logger::bootstrap();
    let cli = Cli::parse();
    let settings = parse_settings(cli.settings.as_deref())?;
    logger.reload(&settings.log.filter)?;

    let backend = cli.storage.as_deref().unwrap_or(&settings.storage.backend);
    let storage: Arc<dyn ClientStorage> = match backend {
        "file" => Arc::new(FsClientStorage::new(settings.storage.path.as_str())),
        _ => Arc::new(MemoryClientStorage::new()),
    };

    // A previously logged-in client: a stored pair whose access half has
    // expired server-side.
    TokenStore::new(storage.clone()).set(&TokenPair {
        access: AccessToken("demo-access".into()),
        refresh: RefreshToken("demo-refresh".into()),
    });

    let transport = Arc::new(FakeRoleTransport::new());
    transport.push_status(Err(SessionError::Unauthorized { status: 401 }));
    transport.push_refresh(Ok(serde_json::from_value(serde_json::json!({
        "access_token": "demo-access-2",
        "refresh_token": "demo-refresh-2",
    }))?));
    transport.push_status(Ok(serde_json::from_value(serde_json::json!({
        "status": "approved",
        "role": "wholesaler",
    }))?));

    let navigator = Arc::new(RecordingNavigator::new());
    let session = SessionOrchestrator::new(storage, transport.clone(), navigator.clone());

    session.initialize().await;
    println!("after initialize: {:?}", session.snapshot());
    println!("stored access token: {:?}", session.token());
    println!(
        "status calls: {}, refresh calls: {}",
        transport.status_call_count(),
        transport.refresh_call_count()
    );

    session.logout();
    println!("after logout: {:?}", session.snapshot());
    println!("login redirects signalled: {}", navigator.login_signals());

    Ok(())
}
