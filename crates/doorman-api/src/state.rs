//! Application state shared across all handlers.

use std::sync::Arc;

use doorman_auth::basic::BasicAuthenticator;
use doorman_auth::service::AuthService;
use doorman_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every handler via Axum's `State` extractor. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The authentication facade.
    pub auth: Arc<AuthService>,
    /// Stateless Basic-auth fallback.
    pub basic: Arc<BasicAuthenticator>,
}

impl AppState {
    /// Assemble the state from its parts.
    pub fn new(config: Arc<AppConfig>, auth: Arc<AuthService>, basic: Arc<BasicAuthenticator>) -> Self {
        Self { config, auth, basic }
    }
}
