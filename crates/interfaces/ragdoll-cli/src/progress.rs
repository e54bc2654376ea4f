use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ragdoll_core::{OpCode, ProgressEvent, Stage};
use ragdoll_pipeline::ProgressDisplay;

/// Terminal rendering of clone/fetch progress: one bar per git operation,
/// a spinner when git only reports a running count.
pub struct IndicatifDisplay {
    hidden: bool,
    bar: Option<ProgressBar>,
    op: Option<OpCode>,
}

impl IndicatifDisplay {
    pub fn new() -> Self {
        Self {
            hidden: false,
            bar: None,
            op: None,
        }
    }

    /// Tracks state without drawing anything.
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::new()
        }
    }

    /// Position and length of the bar currently shown.
    pub fn current(&self) -> Option<(OpCode, u64, Option<u64>)> {
        let bar = self.bar.as_ref()?;
        Some((self.op?, bar.position(), bar.length()))
    }

    fn start(&mut self, event: &ProgressEvent) -> ProgressBar {
        if let Some(prev) = self.bar.take() {
            if !prev.is_finished() {
                prev.finish();
            }
        }

        let target = if self.hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr_with_hz(ragdoll_config::PROGRESS_DRAW_HZ)
        };
        let bar = ProgressBar::with_draw_target(event.total, target);
        bar.set_style(if event.total.is_some() {
            bar_style()
        } else {
            spinner_style()
        });
        bar.set_prefix(event.op.label());

        self.op = Some(event.op);
        self.bar = Some(bar.clone());
        bar
    }
}

impl Default for IndicatifDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressDisplay for IndicatifDisplay {
    fn render(&mut self, event: &ProgressEvent) {
        let bar = match &self.bar {
            Some(bar) if self.op == Some(event.op) && !bar.is_finished() => bar.clone(),
            _ => self.start(event),
        };

        if let Some(total) = event.total {
            bar.set_length(total);
        }
        bar.set_position(event.current);
        bar.set_message(event.message.clone());
        if event.stage == Stage::End {
            bar.finish();
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            if !bar.is_finished() {
                bar.finish();
            }
        }
        self.op = None;
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:>20} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
    )
    .map(|s| s.progress_chars("=>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:>20} {spinner:.green} {pos} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(op: OpCode, stage: Stage, current: u64, total: Option<u64>) -> ProgressEvent {
        ProgressEvent {
            op,
            stage,
            current,
            total,
            message: String::new(),
        }
    }

    #[test]
    fn new_op_starts_a_new_bar() {
        let mut display = IndicatifDisplay::hidden();
        display.render(&ev(OpCode::Receiving, Stage::Begin, 0, Some(10)));
        display.render(&ev(OpCode::Receiving, Stage::Progress, 4, Some(10)));
        assert_eq!(display.current(), Some((OpCode::Receiving, 4, Some(10))));

        display.render(&ev(OpCode::Resolving, Stage::Begin, 1, Some(3)));
        assert_eq!(display.current(), Some((OpCode::Resolving, 1, Some(3))));

        display.finish();
        assert_eq!(display.current(), None);
    }

    #[test]
    fn unknown_total_uses_a_spinner_without_length() {
        let mut display = IndicatifDisplay::hidden();
        display.render(&ev(OpCode::Enumerating, Stage::Begin, 120, None));
        assert_eq!(display.current(), Some((OpCode::Enumerating, 120, None)));
    }
}
