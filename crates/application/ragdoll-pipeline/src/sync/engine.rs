use ragdoll_core::{ProgressSink, SyncConfig, SyncOutcome};
use tracing::{error, info, warn};

use crate::progress::{ProgressDisplay, ProgressReporter};
use crate::sync::vcs::{GitVcsEngine, VcsEngine};
use crate::sync::{SyncError, SyncOptions};

/// Brings `target_directory` in line with the configured source: a fresh
/// clone when it is absent, a fetch when it is already there.
pub struct SyncEngine {
    vcs: Box<dyn VcsEngine>,
    reporter: ProgressReporter,
    options: SyncOptions,
}

impl SyncEngine {
    pub fn new(display: Box<dyn ProgressDisplay>) -> Self {
        Self::with_components(
            Box::new(GitVcsEngine::default()),
            ProgressReporter::new(display),
            SyncOptions::default(),
        )
    }

    pub fn with_components(
        vcs: Box<dyn VcsEngine>,
        reporter: ProgressReporter,
        options: SyncOptions,
    ) -> Self {
        Self {
            vcs,
            reporter,
            options,
        }
    }

    pub fn reporter(&self) -> &ProgressReporter {
        &self.reporter
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub async fn synchronize(&mut self, config: &SyncConfig) -> Result<SyncOutcome, SyncError> {
        let directory = &config.target_directory;

        if directory.exists() {
            warn!(
                "Directory {} already exists; reusing it and fetching updates for {}",
                directory,
                config.repo_name()
            );

            let report = config.verbose && self.options.report_fetch_progress;
            let progress: Option<&mut dyn ProgressSink> = if report {
                Some(&mut self.reporter)
            } else {
                None
            };
            let result = self.vcs.fetch(directory, progress).await;
            if report {
                self.reporter.finish();
            }

            return match result {
                Ok(()) => {
                    info!("Fetched latest refs into {}", directory);
                    Ok(SyncOutcome::AlreadyExists)
                }
                Err(source) => {
                    let err = SyncError::Fetch {
                        directory: directory.clone(),
                        branch: config.branch.clone(),
                        source,
                    };
                    error!("{err}");
                    Err(err)
                }
            };
        }

        info!(
            "Cloning {} (branch {}) into {}",
            config.source_url, config.branch, directory
        );

        let progress: Option<&mut dyn ProgressSink> = if config.verbose {
            Some(&mut self.reporter)
        } else {
            None
        };
        let result = self
            .vcs
            .clone_repo(&config.source_url, directory, &config.branch, progress)
            .await;
        if config.verbose {
            self.reporter.finish();
        }

        match result {
            Ok(()) => {
                info!(
                    "Cloned {} ({}) into {}",
                    config.repo_name(),
                    config.branch,
                    directory
                );
                Ok(SyncOutcome::ClonedFresh)
            }
            Err(source) => {
                let err = SyncError::Clone {
                    url: config.source_url.clone(),
                    branch: config.branch.clone(),
                    source,
                };
                error!("{err}");
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("reporter", &self.reporter)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
