use camino::Utf8Path;
use ragdoll_core::ProgressSink;
use ragdoll_infra::git::{GitCli, GitError};

/// The version-control operations synchronization needs.
#[async_trait::async_trait]
pub trait VcsEngine: Send + Sync {
    async fn clone_repo(
        &self,
        url: &str,
        directory: &Utf8Path,
        branch: &str,
        progress: Option<&mut dyn ProgressSink>,
    ) -> Result<(), GitError>;

    /// Update remote-tracking refs only; the working tree is left as is.
    async fn fetch(
        &self,
        directory: &Utf8Path,
        progress: Option<&mut dyn ProgressSink>,
    ) -> Result<(), GitError>;
}

/// Backed by the `git` executable.
#[derive(Debug, Clone, Default)]
pub struct GitVcsEngine {
    git: GitCli,
}

impl GitVcsEngine {
    pub fn new(git: GitCli) -> Self {
        Self { git }
    }
}

#[async_trait::async_trait]
impl VcsEngine for GitVcsEngine {
    async fn clone_repo(
        &self,
        url: &str,
        directory: &Utf8Path,
        branch: &str,
        progress: Option<&mut dyn ProgressSink>,
    ) -> Result<(), GitError> {
        self.git.clone_repo(url, directory, branch, progress).await
    }

    async fn fetch(
        &self,
        directory: &Utf8Path,
        progress: Option<&mut dyn ProgressSink>,
    ) -> Result<(), GitError> {
        self.git.fetch(directory, progress).await
    }
}
