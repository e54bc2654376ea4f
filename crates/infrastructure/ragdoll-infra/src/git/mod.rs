use camino::Utf8Path;
use ragdoll_core::ProgressSink;
use std::collections::VecDeque;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

pub mod progress;
use crate::git::progress::{LineSplitter, ProgressParser};

/// Non-progress stderr lines kept for the error message.
const STDERR_TAIL_LINES: usize = 20;

const GIT_CEILING_DIRECTORIES: &str = "GIT_CEILING_DIRECTORIES";

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("io error while reading git output: {0}")]
    Io(#[from] std::io::Error),
    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Drives the `git` executable. Blocks (asynchronously) until the command exits;
/// there is no timeout.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `git clone --branch <branch> -- <url> <directory>`.
    ///
    /// Progress is only requested from git when a sink is supplied.
    pub async fn clone_repo(
        &self,
        url: &str,
        directory: &Utf8Path,
        branch: &str,
        progress: Option<&mut dyn ProgressSink>,
    ) -> Result<(), GitError> {
        let mut args = vec!["clone", "--branch", branch];
        if progress.is_some() {
            args.push("--progress");
        }
        args.extend(["--", url, directory.as_str()]);
        self.run(&args, &[], progress).await
    }

    /// `git -C <directory> fetch`: updates remote refs only, never touches the working tree.
    ///
    /// Repository discovery stops at `directory`, so a plain directory nested
    /// inside some other checkout fails instead of fetching the outer one.
    pub async fn fetch(
        &self,
        directory: &Utf8Path,
        progress: Option<&mut dyn ProgressSink>,
    ) -> Result<(), GitError> {
        let mut args = vec!["-C", directory.as_str(), "fetch"];
        if progress.is_some() {
            args.push("--progress");
        }

        let mut envs = Vec::new();
        if let Some(ceiling) = directory
            .canonicalize_utf8()
            .ok()
            .and_then(|d| d.parent().map(Utf8Path::to_path_buf))
        {
            envs.push((GIT_CEILING_DIRECTORIES, ceiling.into_string()));
        }
        self.run(&args, &envs, progress).await
    }

    async fn run(
        &self,
        args: &[&str],
        envs: &[(&str, String)],
        mut progress: Option<&mut dyn ProgressSink>,
    ) -> Result<(), GitError> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!("Running {command}");

        let mut child = Command::new(&self.program)
            .args(args)
            .envs(envs.iter().map(|(k, v)| (*k, v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut splitter = LineSplitter::default();
        let mut log = StderrLog::default();

        if let Some(mut stderr) = child.stderr.take() {
            let mut chunk = [0u8; 4096];
            loop {
                let n = stderr.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                for line in splitter.push(&chunk[..n]) {
                    log.dispatch(line, progress.as_deref_mut());
                }
            }
            if let Some(line) = splitter.finish() {
                log.dispatch(line, progress.as_deref_mut());
            }
        }

        let status = child.wait().await?;
        if status.success() {
            return Ok(());
        }

        Err(GitError::Failed {
            command,
            status,
            stderr: log.tail(),
        })
    }
}

/// Routes stderr lines: progress lines become events, everything else is kept
/// (bounded) for the error message.
#[derive(Debug, Default)]
struct StderrLog {
    parser: ProgressParser,
    tail: VecDeque<String>,
}

impl StderrLog {
    fn dispatch<'s>(&mut self, line: String, sink: Option<&mut (dyn ProgressSink + 's)>) {
        if let Some(event) = self.parser.parse_line(&line) {
            if let Some(sink) = sink {
                sink.on_progress(event);
            }
            return;
        }
        debug!("git: {line}");
        self.tail.push_back(line);
        if self.tail.len() > STDERR_TAIL_LINES {
            self.tail.pop_front();
        }
    }

    fn tail(&self) -> String {
        self.tail.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}
