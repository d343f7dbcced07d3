use std::sync::Arc;

use tracing::{error, info};

use crate::config::app::StoreBackend;
use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::store::{DocumentStore, MemoryStore, SeaStore};

enum StoreSource {
    None,
    Backend(StoreBackend, DbProfile),
    Instance(Arc<dyn DocumentStore>),
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    store: StoreSource,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            store: StoreSource::None,
        }
    }

    /// Open the configured backend at build time.
    pub fn with_store_backend(mut self, backend: StoreBackend, profile: DbProfile) -> Self {
        self.store = StoreSource::Backend(backend, profile);
        self
    }

    /// Use an already constructed store.
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = StoreSource::Instance(store);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Build the state. A database that cannot be reached is logged and the
    /// state is built without a store; store routes then answer 503.
    pub async fn build(self) -> Result<AppState, AppError> {
        let store: Option<Arc<dyn DocumentStore>> = match self.store {
            StoreSource::None => None,
            StoreSource::Instance(store) => Some(store),
            StoreSource::Backend(StoreBackend::Memory, _) => Some(Arc::new(MemoryStore::new())),
            StoreSource::Backend(StoreBackend::Postgres, profile) => {
                match bootstrap_db(profile).await {
                    Ok(conn) => Some(Arc::new(SeaStore::new(conn))),
                    // Configuration mistakes are not outages
                    Err(e @ AppError::Config { .. }) => return Err(e),
                    Err(e) => {
                        error!(error = %e, "document store unavailable; serving without it");
                        None
                    }
                }
            }
        };

        match store {
            Some(store) => {
                info!(backend = store.backend_name(), "document store ready");
                Ok(AppState::new(store, self.security_config))
            }
            None => Ok(AppState::new_without_store(self.security_config)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
