//! Central configuration constants for the bootstrap run and its defaults.

/// Repository cloned when nothing else is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/Unity-Technologies/ml-agents.git";

/// Branch checked out by a fresh clone.
pub const DEFAULT_BRANCH: &str = "develop";

/// Target working copy, relative to the current directory.
pub const DEFAULT_TARGET_DIRECTORY: &str = "ml-agents";

/// Live transfer progress is shown by default.
pub const DEFAULT_VERBOSE: bool = true;

/// Width of the dashed rule under the banner.
pub const DEFAULT_DISPLAY_WIDTH: usize = 91;

/// Delay between orchestration phases, in seconds.
pub const DEFAULT_PACE_DELAY_SECONDS: f64 = 0.43;

/// Minimum allowed display width.
pub const MIN_DISPLAY_WIDTH: usize = 1;

/// Maximum allowed display width.
pub const MAX_DISPLAY_WIDTH: usize = 512;

/// Persisted configuration file, resolved against the working directory.
pub const CONFIG_FILE_NAME: &str = "configuration.ini";

/// INI section holding every persisted key.
pub const CONFIG_SECTION: &str = "Configuration";

pub const KEY_URL: &str = "url";
pub const KEY_BRANCH: &str = "branch";
pub const KEY_DIRECTORY: &str = "directory";
pub const KEY_VERBOSE: &str = "verbose";
pub const KEY_DISPLAY_WIDTH: &str = "num_dashes";
pub const KEY_PACE_DELAY: &str = "sleep_time";

/// Packages installed from the working copy, in install order.
pub const INSTALL_PACKAGES: [&str; 2] = ["./ml-agents-envs", "./ml-agents"];

/// Installer invocation; the package path is appended as the last argument.
pub const DEFAULT_INSTALLER_COMMAND: &str = "python -m pip install";

/// Minimum time between two progress redraws, in milliseconds.
pub const PROGRESS_REFRESH_MILLIS: u64 = 100;

/// Redraw rate handed to the terminal progress bar.
pub const PROGRESS_DRAW_HZ: u8 = 10;

/// Convenience function to clamp a display width into allowed range.
pub fn clamp_display_width(v: usize) -> usize {
    v.clamp(MIN_DISPLAY_WIDTH, MAX_DISPLAY_WIDTH)
}
