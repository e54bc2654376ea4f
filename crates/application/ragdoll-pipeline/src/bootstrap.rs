use ragdoll_core::{SyncConfig, SyncOutcome};
use ragdoll_persistence::{ConfigError, ConfigStore};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::install::InstallStep;
use crate::pacing::PacingController;
use crate::sync::{SyncEngine, SyncError};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Hooks for the front end to draw between phases. All default to no-ops.
pub trait BootstrapObserver {
    /// The configuration was persisted and re-read successfully.
    fn on_configured(&mut self, _config: &SyncConfig) {}
    fn on_synced(&mut self, _config: &SyncConfig, _outcome: SyncOutcome) {}
    fn on_installed(&mut self, _config: &SyncConfig, _installed: bool) {}
}

#[derive(Debug, Default)]
pub struct NoopObserver;

impl BootstrapObserver for NoopObserver {}

#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    pub config: SyncConfig,
    pub sync: SyncOutcome,
    pub installed: bool,
}

/// Runs the whole setup: persist config, synchronize, install.
#[derive(Debug)]
pub struct Bootstrap {
    store: ConfigStore,
    sync: SyncEngine,
    install: InstallStep,
}

impl Bootstrap {
    pub fn new(store: ConfigStore, sync: SyncEngine, install: InstallStep) -> Self {
        Self {
            store,
            sync,
            install,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn sync_engine(&self) -> &SyncEngine {
        &self.sync
    }

    /// Configuration and sync failures abort before anything is installed.
    /// An install failure is reported in [`BootstrapReport::installed`].
    pub async fn run(
        &mut self,
        config: &SyncConfig,
        observer: &mut dyn BootstrapObserver,
    ) -> Result<BootstrapReport, BootstrapError> {
        let pacing = PacingController::from_config(config);

        self.store.save(config)?;
        let persisted = self.store.load()?;
        if persisted != *config {
            // The in-memory value stays authoritative for this run.
            warn!(
                "Configuration read back from {} differs from the one written",
                self.store.path()
            );
        }
        debug!("Configuration persisted to {}", self.store.path());
        pacing.pause().await;

        observer.on_configured(config);
        pacing.pause().await;

        let outcome = self.sync.synchronize(config).await?;
        info!("Repository {}: {}", config.repo_name(), outcome);
        observer.on_synced(config, outcome);
        pacing.pause().await;

        let installed = self.install.install(&config.target_directory).await;
        observer.on_installed(config, installed);
        pacing.pause().await;

        // Leave the final status on screen for a moment before exiting.
        pacing.pause().await;

        Ok(BootstrapReport {
            config: config.clone(),
            sync: outcome,
            installed,
        })
    }
}
