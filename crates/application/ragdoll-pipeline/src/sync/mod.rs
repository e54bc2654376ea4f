use camino::Utf8PathBuf;
use ragdoll_infra::git::GitError;

pub mod engine;
pub mod vcs;

#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Attach the reporter to fetches of an existing working copy as well.
    /// Off by default: only clones render progress.
    pub report_fetch_progress: bool,
}

/// High-level error type for sync operations. Always fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to clone {url} (branch {branch}): {source}")]
    Clone {
        url: String,
        branch: String,
        #[source]
        source: GitError,
    },
    #[error("failed to fetch updates into {directory} (branch {branch}): {source}")]
    Fetch {
        directory: Utf8PathBuf,
        branch: String,
        #[source]
        source: GitError,
    },
}

pub use engine::SyncEngine;
pub use vcs::{GitVcsEngine, VcsEngine};
