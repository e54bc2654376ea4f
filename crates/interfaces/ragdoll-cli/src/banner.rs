use ragdoll_core::{SyncConfig, SyncOutcome};
use ragdoll_pipeline::BootstrapObserver;
use std::io::{IsTerminal, Write};
use tracing::warn;

pub const TITLE: &str = "N E K O   C A T   G A M E";
pub const TAGLINE: &str =
    "=^_^=  =^_^=  C A T  G A M E  R E S E A R C H  =^_^=  N E K O  C A T  G A M E  =^_^=  =^_^=";

pub fn render_banner(display_width: usize) -> String {
    let rule = "-".repeat(ragdoll_config::clamp_display_width(display_width));
    format!("{TITLE}\n\n{TAGLINE}\n{rule}")
}

/// Write the banner, optionally clearing the screen first, and flush.
pub fn draw_banner(out: &mut impl Write, display_width: usize, clear: bool) -> std::io::Result<()> {
    if clear {
        // Clear screen, cursor home.
        out.write_all(b"\x1b[2J\x1b[H")?;
    }
    writeln!(out, "{}", render_banner(display_width))?;
    out.flush()
}

/// Prints the banner and per-phase status lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl BootstrapObserver for ConsoleObserver {
    fn on_configured(&mut self, config: &SyncConfig) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let clear = out.is_terminal();
        if let Err(e) = draw_banner(&mut out, config.display_width, clear) {
            warn!("Could not draw banner: {e}");
        }
    }

    fn on_synced(&mut self, config: &SyncConfig, outcome: SyncOutcome) {
        println!(
            ":: {} ({}) in {}: {}",
            config.repo_name(),
            config.branch,
            config.target_directory,
            outcome
        );
    }

    fn on_installed(&mut self, config: &SyncConfig, installed: bool) {
        if installed {
            println!(":: Packages installed from {}", config.target_directory);
        } else {
            println!(":: Package installation failed (see log above)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_matches_display_width() {
        let banner = render_banner(91);
        let rule = banner.lines().last().unwrap();
        assert_eq!(rule.len(), 91);
        assert!(rule.chars().all(|c| c == '-'));
        assert!(banner.contains(TAGLINE));
    }

    #[test]
    fn clear_sequence_precedes_the_banner_only_when_asked() {
        let mut plain = Vec::new();
        draw_banner(&mut plain, 5, false).unwrap();
        assert_eq!(String::from_utf8(plain).unwrap(), format!("{}\n", render_banner(5)));

        let mut cleared = Vec::new();
        draw_banner(&mut cleared, 5, true).unwrap();
        let text = String::from_utf8(cleared).unwrap();
        assert!(text.starts_with("\x1b[2J\x1b[H"));
        assert!(text.ends_with("-----\n"));
    }

    #[test]
    fn zero_width_still_draws_a_rule() {
        let banner = render_banner(0);
        assert_eq!(banner.lines().last(), Some("-"));
    }
}
