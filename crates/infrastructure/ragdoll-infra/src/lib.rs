pub mod git;
pub mod installer;

// Re-exports for convenience
pub use git::{GitCli, GitError};
pub use installer::{InstallError, InstallerCommand};
