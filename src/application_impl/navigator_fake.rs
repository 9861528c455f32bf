use crate::domain_port::Navigator;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts login redirects instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    logins: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login_signals(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn to_login(&self) {
        self.logins.fetch_add(1, Ordering::SeqCst);
    }
}
