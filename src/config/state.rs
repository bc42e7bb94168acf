// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::handler::Dispatcher;
use crate::storage::ObjectStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Build the state around an already constructed object store
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Self {
        let dispatcher =
            Dispatcher::with_options(store, config.identity.clone(), config.status_page);
        Self { config, dispatcher }
    }

    /// Build the state with the object store selected in `config`
    pub fn from_config(config: Config) -> Self {
        let store = crate::storage::from_config(&config.storage);
        Self::new(config, store)
    }
}
