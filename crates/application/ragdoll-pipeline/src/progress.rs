use ragdoll_core::{OpCode, ProgressEvent, ProgressSink};
use std::time::{Duration, Instant};

/// Surface a reporter draws on (terminal bar, test recorder, ...).
pub trait ProgressDisplay: Send {
    fn render(&mut self, event: &ProgressEvent);
    /// Called once the transfer is over; clears or freezes whatever was drawn.
    fn finish(&mut self);
}

/// Draws nothing.
#[derive(Debug, Default)]
pub struct HiddenDisplay;

impl ProgressDisplay for HiddenDisplay {
    fn render(&mut self, _event: &ProgressEvent) {}
    fn finish(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Verbose,
    Silent,
}

/// Receives engine progress callbacks and renders them at a bounded rate.
///
/// The first event, an op change and a completed event are always drawn;
/// anything else is drawn at most once per refresh interval. The newest
/// swallowed event is flushed by [`ProgressReporter::finish`].
pub struct ProgressReporter {
    mode: ReportMode,
    display: Box<dyn ProgressDisplay>,
    refresh_interval: Duration,
    last_render: Option<Instant>,
    last_op: Option<OpCode>,
    pending: Option<ProgressEvent>,
    events_received: u64,
    renders: u64,
}

impl ProgressReporter {
    pub fn new(display: Box<dyn ProgressDisplay>) -> Self {
        Self::with_mode(ReportMode::Verbose, display)
    }

    pub fn silent() -> Self {
        Self::with_mode(ReportMode::Silent, Box::new(HiddenDisplay))
    }

    fn with_mode(mode: ReportMode, display: Box<dyn ProgressDisplay>) -> Self {
        Self {
            mode,
            display,
            refresh_interval: Duration::from_millis(ragdoll_config::PROGRESS_REFRESH_MILLIS),
            last_render: None,
            last_op: None,
            pending: None,
            events_received: 0,
            renders: 0,
        }
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    pub fn events_received(&self) -> u64 {
        self.events_received
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Flush the last swallowed event and release the display.
    pub fn finish(&mut self) {
        if let Some(event) = self.pending.take() {
            self.draw(event, Instant::now());
        }
        if self.mode == ReportMode::Verbose {
            self.display.finish();
        }
        self.last_render = None;
        self.last_op = None;
    }

    fn draw(&mut self, event: ProgressEvent, now: Instant) {
        self.display.render(&event);
        self.renders += 1;
        self.last_render = Some(now);
        self.last_op = Some(event.op);
    }
}

impl ProgressSink for ProgressReporter {
    fn on_progress(&mut self, event: ProgressEvent) {
        self.events_received += 1;
        if self.mode == ReportMode::Silent {
            return;
        }

        let now = Instant::now();
        let op_changed = self.last_op != Some(event.op);
        if op_changed {
            // Close out the previous op at its latest known position.
            if let Some(prev) = self.pending.take() {
                self.draw(prev, now);
            }
        }

        let due = self
            .last_render
            .map_or(true, |at| now.duration_since(at) >= self.refresh_interval);

        if op_changed || due || event.is_complete() {
            self.pending = None;
            self.draw(event, now);
        } else {
            self.pending = Some(event);
        }
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("mode", &self.mode)
            .field("refresh_interval", &self.refresh_interval)
            .field("events_received", &self.events_received)
            .field("renders", &self.renders)
            .finish()
    }
}
