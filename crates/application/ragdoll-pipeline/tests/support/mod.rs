#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use ragdoll_core::{OpCode, ProgressEvent, ProgressSink, Stage};
use ragdoll_infra::git::GitError;
use ragdoll_infra::installer::InstallError;
use ragdoll_pipeline::{PackageInstaller, ProgressDisplay, VcsEngine};
use std::sync::{Arc, Mutex};

pub fn scratch() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    (dir, root)
}

pub fn event(op: OpCode, stage: Stage, current: u64, total: Option<u64>) -> ProgressEvent {
    ProgressEvent {
        op,
        stage,
        current,
        total,
        message: String::new(),
    }
}

/// What a clone of a small repository looks like from git's side.
pub fn clone_transcript() -> Vec<ProgressEvent> {
    vec![
        event(OpCode::Counting, Stage::End, 6, Some(6)),
        event(OpCode::Receiving, Stage::Begin, 0, Some(6)),
        event(OpCode::Receiving, Stage::Progress, 3, Some(6)),
        event(OpCode::Receiving, Stage::End, 6, Some(6)),
        event(OpCode::Resolving, Stage::Begin, 0, Some(2)),
        event(OpCode::Resolving, Stage::End, 2, Some(2)),
    ]
}

fn fake_failure() -> GitError {
    GitError::Spawn {
        program: "git".into(),
        source: std::io::Error::new(std::io::ErrorKind::Other, "remote hung up"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Clone {
        url: String,
        directory: Utf8PathBuf,
        branch: String,
        with_progress: bool,
    },
    Fetch {
        directory: Utf8PathBuf,
        with_progress: bool,
    },
}

/// Records every call and replays a fixed progress transcript into the sink.
#[derive(Clone, Default)]
pub struct RecordingVcs {
    pub calls: Arc<Mutex<Vec<VcsCall>>>,
    pub transcript: Vec<ProgressEvent>,
    pub fail: bool,
    /// Shared phase journal, for ordering assertions across fakes.
    pub journal: Option<Arc<Mutex<Vec<String>>>>,
}

impl RecordingVcs {
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.lock().unwrap().clone()
    }

    fn replay<'s>(&self, progress: Option<&mut (dyn ProgressSink + 's)>) {
        if let Some(sink) = progress {
            for ev in &self.transcript {
                sink.on_progress(ev.clone());
            }
        }
    }

    fn note(&self, entry: &str) {
        if let Some(journal) = &self.journal {
            journal.lock().unwrap().push(entry.to_string());
        }
    }
}

#[async_trait::async_trait]
impl VcsEngine for RecordingVcs {
    async fn clone_repo(
        &self,
        url: &str,
        directory: &Utf8Path,
        branch: &str,
        progress: Option<&mut dyn ProgressSink>,
    ) -> Result<(), GitError> {
        self.calls.lock().unwrap().push(VcsCall::Clone {
            url: url.to_string(),
            directory: directory.to_path_buf(),
            branch: branch.to_string(),
            with_progress: progress.is_some(),
        });
        self.note("clone");
        self.replay(progress);
        if self.fail {
            return Err(fake_failure());
        }
        Ok(())
    }

    async fn fetch(
        &self,
        directory: &Utf8Path,
        progress: Option<&mut dyn ProgressSink>,
    ) -> Result<(), GitError> {
        self.calls.lock().unwrap().push(VcsCall::Fetch {
            directory: directory.to_path_buf(),
            with_progress: progress.is_some(),
        });
        self.note("fetch");
        self.replay(progress);
        if self.fail {
            return Err(fake_failure());
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingDisplay {
    pub rendered: Arc<Mutex<Vec<ProgressEvent>>>,
    pub finished: Arc<Mutex<usize>>,
}

impl RecordingDisplay {
    pub fn rendered(&self) -> Vec<ProgressEvent> {
        self.rendered.lock().unwrap().clone()
    }

    pub fn finished(&self) -> usize {
        *self.finished.lock().unwrap()
    }
}

impl ProgressDisplay for RecordingDisplay {
    fn render(&mut self, event: &ProgressEvent) {
        self.rendered.lock().unwrap().push(event.clone());
    }

    fn finish(&mut self) {
        *self.finished.lock().unwrap() += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallBehaviour {
    Succeed,
    ExitNonZero,
    SpawnError,
}

/// Installer fake; packages not listed in `behaviour` succeed.
#[derive(Clone, Default)]
pub struct RecordingInstaller {
    pub calls: Arc<Mutex<Vec<(Utf8PathBuf, String)>>>,
    pub behaviour: Vec<(String, InstallBehaviour)>,
    pub journal: Option<Arc<Mutex<Vec<String>>>>,
}

impl RecordingInstaller {
    pub fn calls(&self) -> Vec<(Utf8PathBuf, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PackageInstaller for RecordingInstaller {
    async fn install_package(
        &self,
        working_dir: &Utf8Path,
        package: &str,
    ) -> Result<bool, InstallError> {
        self.calls
            .lock()
            .unwrap()
            .push((working_dir.to_path_buf(), package.to_string()));
        if let Some(journal) = &self.journal {
            journal.lock().unwrap().push(format!("install {package}"));
        }

        let behaviour = self
            .behaviour
            .iter()
            .find(|(p, _)| p == package)
            .map(|(_, b)| *b)
            .unwrap_or(InstallBehaviour::Succeed);
        match behaviour {
            InstallBehaviour::Succeed => Ok(true),
            InstallBehaviour::ExitNonZero => Ok(false),
            InstallBehaviour::SpawnError => Err(InstallError::Spawn {
                program: "python".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}

/// Captures formatted log output for the current thread.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
