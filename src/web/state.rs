//! # Web API Application State
//!
//! Shared state handed to every handler: configuration, the task service and the
//! identity verifier used by the auth middleware.

use std::sync::Arc;
use tracing::info;

use crate::config::{ConfigManager, TaskboardConfig};
use crate::database::TaskStore;
use crate::services::TaskService;
use crate::web::auth::{AuthError, IdentityVerifier, JwtVerifier};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<TaskboardConfig>,
    pub task_service: TaskService,
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.config.environment)
            .field("task_service", &self.task_service)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build state from loaded configuration, verifying tokens with the configured
    /// JWT secret.
    pub fn from_config(
        manager: &ConfigManager,
        store: Arc<dyn TaskStore>,
    ) -> Result<Self, AuthError> {
        let config = manager.config().clone();
        let verifier = JwtVerifier::from_config(&config.auth)?;

        info!(
            environment = %manager.environment(),
            bind_address = %config.web.bind_address,
            default_limit = config.pagination.default_limit,
            max_limit = config.pagination.max_limit,
            "Web API state initialized"
        );

        Ok(Self::with_verifier(config, store, Arc::new(verifier)))
    }

    pub fn with_verifier(
        config: TaskboardConfig,
        store: Arc<dyn TaskStore>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        let task_service = TaskService::new(store, config.pagination);
        Self {
            config: Arc::new(config),
            task_service,
            verifier,
        }
    }
}
