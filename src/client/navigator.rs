use std::sync::{Mutex, PoisonError};

use tracing::info;

/// Receives the pipeline's requests to move the user to another page.
///
/// A browser host would assign `window.location`; the CLI just logs.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Logs navigation requests.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!(
            event_name = "navigation.requested",
            event_domain = "navigation",
            path,
            "navigation requested"
        );
    }
}

/// Remembers every navigation request, in order.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visits().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
