pub mod banner;
pub mod commands;
pub mod progress;

use camino::Utf8PathBuf;
use clap::Args;
use ragdoll_core::SyncConfig;

/// Command-line overrides layered on top of the defaults or the persisted file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Repository to clone
    #[arg(long)]
    pub url: Option<String>,
    /// Branch to check out
    #[arg(long)]
    pub branch: Option<String>,
    /// Target directory for the working copy
    #[arg(long)]
    pub directory: Option<Utf8PathBuf>,
    /// Clone without rendering transfer progress
    #[arg(long)]
    pub no_progress: bool,
    /// Width of the dashed rule under the banner
    #[arg(long)]
    pub display_width: Option<usize>,
    /// Pause between phases, in seconds
    #[arg(long, value_parser = parse_seconds)]
    pub sleep_time: Option<f64>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut SyncConfig) {
        if let Some(url) = &self.url {
            config.source_url = url.clone();
        }
        if let Some(branch) = &self.branch {
            config.branch = branch.clone();
        }
        if let Some(dir) = &self.directory {
            config.target_directory = dir.clone();
        }
        if self.no_progress {
            config.verbose = false;
        }
        if let Some(width) = self.display_width {
            config.display_width = ragdoll_config::clamp_display_width(width);
        }
        if let Some(secs) = self.sleep_time {
            config.pace_delay_seconds = secs;
        }
    }
}

fn parse_seconds(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("`{s}` must be a non-negative number of seconds"));
    }
    Ok(v)
}
