use std::fmt;
use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::store::DocumentStore;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Document store (absent when the backend could not be reached at startup)
    store: Option<Arc<dyn DocumentStore>>,
    /// Security configuration including JWT and cookie settings
    pub security: SecurityConfig,
}

impl AppState {
    /// Create a new AppState with the given store and security config
    pub fn new(store: Arc<dyn DocumentStore>, security: SecurityConfig) -> Self {
        Self {
            store: Some(store),
            security,
        }
    }

    /// Create a new AppState without a store; store routes answer 503.
    pub fn new_without_store(security: SecurityConfig) -> Self {
        Self {
            store: None,
            security,
        }
    }

    pub fn store(&self) -> Option<&dyn DocumentStore> {
        self.store.as_deref()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.as_ref().map(|s| s.backend_name()))
            .field("security", &self.security)
            .finish()
    }
}
