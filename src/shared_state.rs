use std::sync::Arc;

use crate::config::Config;
use crate::models::reference::ReferenceTables;

/// Read-only state shared by every request. Analyses never write to it, so
/// requests cannot observe each other.
#[derive(Clone, Debug)]
pub struct AppState {
    pub tables: Arc<ReferenceTables>,
    /// Shared secret for the `/api` routes; `None` disables authentication
    pub access_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            tables: Arc::new(ReferenceTables::builtin()),
            access_key: config.auth.access_key.as_deref().map(Arc::from),
        }
    }

    pub fn auth_enabled(&self) -> bool {
        self.access_key.is_some()
    }
}
