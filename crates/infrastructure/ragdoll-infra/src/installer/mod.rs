use camino::{Utf8Path, Utf8PathBuf};
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("installer command `{0}` could not be parsed")]
    Parse(String),
    #[error("installer command is empty")]
    EmptyCommand,
    #[error("failed to start installer `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// An installer invocation such as `python -m pip install`; the package path
/// is appended as the final argument.
#[derive(Debug, Clone)]
pub struct InstallerCommand {
    template: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedInstallCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Utf8PathBuf,
}

#[cfg(target_os = "windows")]
fn split_command(cmd: &str) -> Option<Vec<String>> {
    // POSIX escaping would eat the backslashes in `C:\Python\python.exe`;
    // only double quotes group words here.
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in cmd.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if in_quotes {
        return None;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    Some(parts)
}

#[cfg(not(target_os = "windows"))]
fn split_command(cmd: &str) -> Option<Vec<String>> {
    shlex::split(cmd)
}

impl InstallerCommand {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub(crate) fn resolve(
        &self,
        working_dir: &Utf8Path,
        package: &str,
    ) -> Result<ResolvedInstallCommand, InstallError> {
        let mut parts =
            split_command(&self.template).ok_or_else(|| InstallError::Parse(self.template.clone()))?;
        if parts.is_empty() {
            return Err(InstallError::EmptyCommand);
        }
        let program = parts.remove(0);
        parts.push(package.to_string());

        Ok(ResolvedInstallCommand {
            program,
            args: parts,
            working_dir: working_dir.to_path_buf(),
        })
    }

    /// Run the installer for `package` with `working_dir` as the child's
    /// current directory. Output goes straight to the operator's terminal.
    pub async fn run(
        &self,
        working_dir: &Utf8Path,
        package: &str,
    ) -> Result<ExitStatus, InstallError> {
        let cmd = self.resolve(working_dir, package)?;
        debug!(
            "Installing: program={:?} args={:?} cwd={}",
            cmd.program, cmd.args, cmd.working_dir
        );

        Command::new(&cmd.program)
            .args(&cmd.args)
            .current_dir(&cmd.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| InstallError::Spawn {
                program: cmd.program.clone(),
                source,
            })
    }
}

impl Default for InstallerCommand {
    fn default() -> Self {
        Self::new(ragdoll_config::DEFAULT_INSTALLER_COMMAND)
    }
}
