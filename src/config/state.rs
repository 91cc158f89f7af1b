// Application state module
// Process-wide context built once at startup and passed to the listener

use crate::middleware::Chain;
use crate::store::MessageStore;

use super::types::Config;

/// Application state shared across connections
pub struct AppState {
    pub config: Config,
    pub chain: Chain,
    pub store: MessageStore,
}

impl AppState {
    /// Build state from loaded configuration and a wired middleware chain
    #[must_use]
    pub fn new(config: Config, chain: Chain) -> Self {
        let store = MessageStore::new(config.app.message_file.clone());
        Self {
            config,
            chain,
            store,
        }
    }
}
