use std::sync::Arc;

use crate::config::AppConfig;
use crate::hubspot::{HubSpotClient, HubSpotError};
use crate::services::PortalService;

/// Shared router state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub portal: PortalService,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self, HubSpotError> {
        let client = HubSpotClient::new(&config.hubspot)?;

        Ok(Self {
            config: Arc::new(config),
            portal: PortalService::new(client),
        })
    }

    pub fn jwt_secret(&self) -> Option<&str> {
        self.config.security.jwt_secret.as_deref()
    }
}
