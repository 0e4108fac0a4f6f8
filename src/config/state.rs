// Application state module
// Bundles the loaded configuration with the per-portal stores

use std::sync::atomic::AtomicBool;

use super::types::Config;
use crate::portal::Portals;

/// Application state, constructed once at startup and shared via `Arc`.
///
/// Stores are owned here rather than living in process-wide globals, so
/// tests can build isolated instances.
pub struct AppState {
    pub config: Config,
    pub portals: Portals,

    // Cached config value for lock-free access on the request path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            cached_access_log: AtomicBool::new(config.logging.access_log),
            config: config.clone(),
            portals: Portals::new(),
        }
    }
}
