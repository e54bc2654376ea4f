use camino::Utf8PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file {path} is missing")]
    Missing { path: Utf8PathBuf },
    #[error("configuration file {path} has no [{section}] section")]
    MissingSection {
        path: Utf8PathBuf,
        section: &'static str,
    },
    #[error("configuration key `{key}` is missing")]
    MissingKey { key: &'static str },
    #[error("configuration key `{key}` expects {expected}, found `{value}`")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("configuration file {path} is malformed: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: ini::ParseError,
    },
    #[error("io error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// File, section or key absent.
    Missing,
    /// A value could not be read as its declared type.
    Type,
    Syntax,
    Io,
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            ConfigError::Missing { .. }
            | ConfigError::MissingSection { .. }
            | ConfigError::MissingKey { .. } => ConfigErrorKind::Missing,
            ConfigError::InvalidType { .. } => ConfigErrorKind::Type,
            ConfigError::Parse { .. } => ConfigErrorKind::Syntax,
            ConfigError::Io { .. } => ConfigErrorKind::Io,
        }
    }
}
