use std::sync::Arc;

use super::config::{AppConfig, AppSettings};
use crate::oauth::AuthClient;

/// Shared, read-only state for route handlers.
#[derive(Clone)]
pub struct AppState {
    pub(super) client: Arc<AuthClient>,
    pub(super) settings: AppSettings,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self::with_client(AuthClient::new(config.oauth), config.settings)
    }

    /// Use a pre-built client (for a shared `reqwest::Client` or testing).
    #[must_use]
    pub fn from_parts(client: AuthClient, config: AppConfig) -> Self {
        Self::with_client(client, config.settings)
    }

    fn with_client(client: AuthClient, settings: AppSettings) -> Self {
        Self {
            client: Arc::new(client),
            settings,
        }
    }
}
