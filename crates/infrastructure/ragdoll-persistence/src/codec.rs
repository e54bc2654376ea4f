//! Typed reads and writes of individual INI values.

use crate::ConfigError;

/// Accepts the same spellings as Python's `configparser.getboolean`.
pub(crate) fn decode_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(invalid(key, "a boolean", raw)),
    }
}

pub(crate) fn decode_usize(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| invalid(key, "a non-negative integer", raw))
}

/// Seconds of delay: any finite, non-negative float.
pub(crate) fn decode_seconds(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(invalid(key, "a non-negative number of seconds", raw)),
    }
}

pub(crate) fn encode_bool(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

/// `f64`'s `Display` is the shortest string that parses back to the same value.
pub(crate) fn encode_seconds(v: f64) -> String {
    v.to_string()
}

fn invalid(key: &'static str, expected: &'static str, raw: &str) -> ConfigError {
    ConfigError::InvalidType {
        key,
        expected,
        value: raw.to_string(),
    }
}
