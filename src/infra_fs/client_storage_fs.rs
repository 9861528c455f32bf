use crate::domain_port::ClientStorage;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// File-per-key storage backend under a client-local directory.
///
/// Backend trouble is logged and swallowed: where the directory cannot be
/// created or read, the store behaves as empty and writes are no-ops.
pub struct FsClientStorage {
    root: PathBuf,
    available: bool,
}

impl FsClientStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let available = match fs::create_dir_all(&root) {
            Ok(()) => true,
            Err(error) => {
                warn!(path = %root.display(), "client storage unavailable: {error}");
                false
            }
        };
        FsClientStorage { root, available }
    }

    // Keys are dotted identifiers; anything else is flattened to keep the
    // file name portable.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(name)
    }
}

impl ClientStorage for FsClientStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(error) if error.kind() == ErrorKind::NotFound => None,
            Err(error) => {
                warn!("could not read stored item {key}: {error}");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        if !self.available {
            return;
        }
        if let Err(error) = fs::write(self.path_for(key), value) {
            warn!("could not persist item {key}: {error}");
        }
    }

    fn remove_item(&self, key: &str) {
        if !self.available {
            return;
        }
        if let Err(error) = fs::remove_file(self.path_for(key)) {
            if error.kind() != ErrorKind::NotFound {
                warn!("could not remove stored item {key}: {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_values_under_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsClientStorage::new(dir.path());

        assert_eq!(storage.get_item("vitrine.session.tokens"), None);
        storage.set_item("vitrine.session.tokens", "{\"access\":\"a\"}");
        assert_eq!(
            storage.get_item("vitrine.session.tokens"),
            Some("{\"access\":\"a\"}".into())
        );

        storage.remove_item("vitrine.session.tokens");
        storage.remove_item("vitrine.session.tokens");
        assert_eq!(storage.get_item("vitrine.session.tokens"), None);
    }

    #[test]
    fn survives_reopen_from_the_same_root() {
        let dir = tempfile::tempdir().unwrap();
        FsClientStorage::new(dir.path()).set_item("k", "v");

        let reopened = FsClientStorage::new(dir.path());
        assert_eq!(reopened.get_item("k"), Some("v".into()));
    }

    #[test]
    fn unavailable_root_degrades_to_noops() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        fs::write(&blocker, "file, not a directory").unwrap();

        // Rooting the store below a regular file makes the backend unusable.
        let storage = FsClientStorage::new(blocker.join("nested"));
        storage.set_item("k", "v");
        assert_eq!(storage.get_item("k"), None);
        storage.remove_item("k");
    }

    #[test]
    fn hostile_key_characters_are_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsClientStorage::new(dir.path());

        storage.set_item("../escape/attempt", "v");
        assert_eq!(storage.get_item("../escape/attempt"), Some("v".into()));
        assert!(!dir.path().join("..").join("escape").exists());
    }
}
