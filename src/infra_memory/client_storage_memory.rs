use crate::domain_port::ClientStorage;
use dashmap::DashMap;

/// In-process storage backend. Used by tests and demos, and as the fallback
/// where no durable backend is configured.
#[derive(Debug, Default)]
pub struct MemoryClientStorage {
    entries: DashMap<String, String>,
}

impl MemoryClientStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStorage for MemoryClientStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set_item(&self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.entries.remove(key);
    }
}
