use camino::Utf8Path;
use ragdoll_infra::installer::{InstallError, InstallerCommand};
use tracing::{error, info};

/// Installs one package from a path relative to a working directory.
#[async_trait::async_trait]
pub trait PackageInstaller: Send + Sync {
    /// `Ok(false)` means the installer ran and reported failure.
    async fn install_package(&self, working_dir: &Utf8Path, package: &str)
        -> Result<bool, InstallError>;
}

#[derive(Debug, Clone, Default)]
pub struct PipPackageInstaller {
    command: InstallerCommand,
}

impl PipPackageInstaller {
    pub fn new(command: InstallerCommand) -> Self {
        Self { command }
    }
}

#[async_trait::async_trait]
impl PackageInstaller for PipPackageInstaller {
    async fn install_package(
        &self,
        working_dir: &Utf8Path,
        package: &str,
    ) -> Result<bool, InstallError> {
        let status = self.command.run(working_dir, package).await?;
        if !status.success() {
            error!(
                "`{} {}` exited with {}",
                self.command.template(),
                package,
                status
            );
        }
        Ok(status.success())
    }
}

/// Installs the checked-out packages in order, stopping at the first failure.
pub struct InstallStep {
    installer: Box<dyn PackageInstaller>,
    packages: Vec<String>,
}

impl InstallStep {
    pub fn new() -> Self {
        Self::with_installer(Box::new(PipPackageInstaller::default()))
    }

    pub fn with_installer(installer: Box<dyn PackageInstaller>) -> Self {
        Self {
            installer,
            packages: ragdoll_config::INSTALL_PACKAGES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// True only if every package installed. Nothing is rolled back on failure.
    pub async fn install(&self, directory: &Utf8Path) -> bool {
        for package in &self.packages {
            info!("Installing {} from {}", package, directory);
            match self.installer.install_package(directory, package).await {
                Ok(true) => info!("Installed {}", package),
                Ok(false) => {
                    error!("Installation of {} failed; skipping the rest", package);
                    return false;
                }
                Err(e) => {
                    error!("Could not install {}: {}", package, e);
                    return false;
                }
            }
        }
        true
    }
}

impl Default for InstallStep {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InstallStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallStep")
            .field("packages", &self.packages)
            .finish_non_exhaustive()
    }
}
