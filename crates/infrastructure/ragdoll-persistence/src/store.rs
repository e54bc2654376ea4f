use camino::{Utf8Path, Utf8PathBuf};
use ini::{EscapePolicy, Ini, ParseOption, Properties};
use ragdoll_config::{
    CONFIG_FILE_NAME, CONFIG_SECTION, KEY_BRANCH, KEY_DIRECTORY, KEY_DISPLAY_WIDTH, KEY_PACE_DELAY,
    KEY_URL, KEY_VERBOSE,
};
use ragdoll_core::SyncConfig;
use tracing::debug;

use crate::codec;
use crate::ConfigError;

/// Reads and writes the `[Configuration]` section of the run's INI file.
///
/// Single-writer: no locking is performed.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: Utf8PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write all six keys, replacing whatever the file held before.
    pub fn save(&self, config: &SyncConfig) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.with_section(Some(CONFIG_SECTION))
            .set(KEY_URL, config.source_url.as_str())
            .set(KEY_BRANCH, config.branch.as_str())
            .set(KEY_DIRECTORY, config.target_directory.as_str())
            .set(KEY_VERBOSE, codec::encode_bool(config.verbose))
            .set(KEY_DISPLAY_WIDTH, config.display_width.to_string())
            .set(KEY_PACE_DELAY, codec::encode_seconds(config.pace_delay_seconds));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.path.with_extension("tmp");
        ini.write_to_file_policy(&tmp, EscapePolicy::Nothing)
            .map_err(|source| ConfigError::Io {
                path: tmp.clone(),
                source,
            })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved configuration to {}", self.path);
        Ok(())
    }

    pub fn load(&self) -> Result<SyncConfig, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::Missing {
                path: self.path.clone(),
            });
        }

        // Values are taken verbatim so Windows paths keep their backslashes.
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_file_opt(&self.path, opt).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: self.path.clone(),
                source,
            },
            ini::Error::Parse(source) => ConfigError::Parse {
                path: self.path.clone(),
                source,
            },
        })?;

        let section = ini
            .section(Some(CONFIG_SECTION))
            .ok_or_else(|| ConfigError::MissingSection {
                path: self.path.clone(),
                section: CONFIG_SECTION,
            })?;

        let config = SyncConfig {
            source_url: required(section, KEY_URL)?.to_string(),
            branch: required(section, KEY_BRANCH)?.to_string(),
            target_directory: Utf8PathBuf::from(required(section, KEY_DIRECTORY)?),
            verbose: codec::decode_bool(KEY_VERBOSE, required(section, KEY_VERBOSE)?)?,
            display_width: codec::decode_usize(
                KEY_DISPLAY_WIDTH,
                required(section, KEY_DISPLAY_WIDTH)?,
            )?,
            pace_delay_seconds: codec::decode_seconds(
                KEY_PACE_DELAY,
                required(section, KEY_PACE_DELAY)?,
            )?,
        };

        debug!("Loaded configuration from {}", self.path);
        Ok(config)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(CONFIG_FILE_NAME)
    }
}

fn required<'a>(section: &'a Properties, key: &'static str) -> Result<&'a str, ConfigError> {
    section.get(key).ok_or(ConfigError::MissingKey { key })
}
