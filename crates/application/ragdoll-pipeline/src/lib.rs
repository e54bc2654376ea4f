pub mod bootstrap;
pub mod install;
pub mod pacing;
pub mod progress;
pub mod sync;

// Re-export core pipeline components
pub use bootstrap::{Bootstrap, BootstrapError, BootstrapObserver, BootstrapReport, NoopObserver};
pub use install::{InstallStep, PackageInstaller, PipPackageInstaller};
pub use pacing::PacingController;
pub use progress::{HiddenDisplay, ProgressDisplay, ProgressReporter, ReportMode};
pub use sync::{GitVcsEngine, SyncEngine, SyncError, SyncOptions, VcsEngine};
