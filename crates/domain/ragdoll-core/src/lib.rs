use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

pub mod progress;
pub mod repo;

pub use progress::{OpCode, ProgressEvent, ProgressSink, Stage};

/// Parameters of one bootstrap run.
///
/// Built once at startup (defaults, CLI overrides or a persisted file) and
/// passed by reference through every phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncConfig {
    pub source_url: String,
    pub branch: String,
    pub target_directory: Utf8PathBuf,
    /// Render live transfer progress while cloning.
    pub verbose: bool,
    /// Width of the dashed rule printed under the banner.
    pub display_width: usize,
    pub pace_delay_seconds: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_url: ragdoll_config::DEFAULT_SOURCE_URL.to_string(),
            branch: ragdoll_config::DEFAULT_BRANCH.to_string(),
            target_directory: Utf8PathBuf::from(ragdoll_config::DEFAULT_TARGET_DIRECTORY),
            verbose: ragdoll_config::DEFAULT_VERBOSE,
            display_width: ragdoll_config::DEFAULT_DISPLAY_WIDTH,
            pace_delay_seconds: ragdoll_config::DEFAULT_PACE_DELAY_SECONDS,
        }
    }
}

impl SyncConfig {
    /// Short repository name derived from `source_url`, used in log lines.
    pub fn repo_name(&self) -> &str {
        repo::repo_name(&self.source_url)
    }
}

/// Result of a successful synchronization.
///
/// Failures are reported through the error arm of the engine's `Result`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The target directory was present; a fetch was issued against it.
    AlreadyExists,
    /// The target directory was absent; a full clone was performed.
    ClonedFresh,
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncOutcome::AlreadyExists => f.write_str("updated existing working copy"),
            SyncOutcome::ClonedFresh => f.write_str("cloned fresh"),
        }
    }
}
