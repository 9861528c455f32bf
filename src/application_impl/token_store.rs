use crate::domain_model::{StoredTokens, TokenPair};
use crate::domain_port::ClientStorage;
use std::sync::Arc;
use tracing::warn;

/// Sole owner of the persisted access/refresh pair.
///
/// Tokens are opaque strings. The pair lives under one storage key as a
/// single serialized record, so a `set` replaces both halves together and a
/// reader never observes a half-written pair.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn ClientStorage>,
}

impl TokenStore {
    pub const KEY: &'static str = "vitrine.session.tokens";

    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        TokenStore { storage }
    }

    /// Never fails; an absent or unreadable record reads as empty.
    pub fn get(&self) -> StoredTokens {
        let Some(raw) = self.storage.get_item(Self::KEY) else {
            return StoredTokens::default();
        };
        match serde_json::from_str(&raw) {
            Ok(tokens) => tokens,
            Err(error) => {
                warn!("discarding unreadable token record: {error}");
                self.storage.remove_item(Self::KEY);
                StoredTokens::default()
            }
        }
    }

    pub fn set(&self, pair: &TokenPair) {
        match serde_json::to_string(&StoredTokens::from(pair.clone())) {
            Ok(raw) => self.storage.set_item(Self::KEY, &raw),
            Err(error) => warn!("could not serialize token record: {error}"),
        }
    }

    /// Idempotent; clearing an empty store is a no-op.
    pub fn clear(&self) {
        self.storage.remove_item(Self::KEY);
    }
}
