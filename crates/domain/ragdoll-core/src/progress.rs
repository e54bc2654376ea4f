use serde::{Deserialize, Serialize};

/// Phase of a transfer as reported by the version-control engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OpCode {
    Enumerating,
    Counting,
    Compressing,
    Writing,
    Receiving,
    Resolving,
    FindingSources,
    CheckingOut,
}

impl OpCode {
    /// Map the label git prints in front of a progress line.
    pub fn from_label(label: &str) -> Option<Self> {
        let first = label.split_whitespace().next()?.to_ascii_lowercase();
        let op = match first.as_str() {
            "enumerating" => OpCode::Enumerating,
            "counting" => OpCode::Counting,
            "compressing" => OpCode::Compressing,
            "writing" => OpCode::Writing,
            "receiving" => OpCode::Receiving,
            "resolving" => OpCode::Resolving,
            "finding" => OpCode::FindingSources,
            "checking" | "updating" => OpCode::CheckingOut,
            _ => return None,
        };
        Some(op)
    }

    pub fn label(self) -> &'static str {
        match self {
            OpCode::Enumerating => "Enumerating objects",
            OpCode::Counting => "Counting objects",
            OpCode::Compressing => "Compressing objects",
            OpCode::Writing => "Writing objects",
            OpCode::Receiving => "Receiving objects",
            OpCode::Resolving => "Resolving deltas",
            OpCode::FindingSources => "Finding sources",
            OpCode::CheckingOut => "Checking out files",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stage {
    Begin,
    Progress,
    /// The engine marked this operation `done`.
    End,
}

/// One progress notification from a running clone or fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressEvent {
    pub op: OpCode,
    pub stage: Stage,
    pub current: u64,
    /// `None` when the engine only reports an absolute count.
    pub total: Option<u64>,
    /// Trailing text of the line, e.g. throughput (`1.20 MiB | 2.40 MiB/s`).
    pub message: String,
}

impl ProgressEvent {
    /// True once the counter reached its known total or the engine said `done`.
    pub fn is_complete(&self) -> bool {
        self.stage == Stage::End || self.total.is_some_and(|t| self.current >= t)
    }
}

/// Receiver of transfer progress callbacks.
///
/// Called synchronously from inside the transfer, potentially once per
/// transferred object, so implementations must stay cheap.
pub trait ProgressSink: Send {
    fn on_progress(&mut self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(ProgressEvent) + Send,
{
    fn on_progress(&mut self, event: ProgressEvent) {
        self(event)
    }
}
