// src/app.rs

use std::sync::Arc;

use crate::config::Config;
use crate::core::error::ScanError;
use crate::core::scanner::SafeBrowsingClient;

/// Application context handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scanner: SafeBrowsingClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ScanError> {
        let scanner = SafeBrowsingClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            scanner,
        })
    }
}
