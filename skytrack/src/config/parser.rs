//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::{Ini, ParseOption, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Largest accepted value for any seconds setting (one day).
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// Options for reading `config.ini`.
///
/// Values are taken verbatim so that whatever the writer emitted reads back
/// unchanged; backslashes and quotes in passwords stay literal.
pub(super) fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [opensky] section
    if let Some(section) = ini.section(Some("opensky")) {
        if let Some(v) = non_empty(section, "base_url") {
            config.opensky.base_url = v.to_string();
        }
        if let Some(v) = non_empty(section, "timeout") {
            config.opensky.timeout = parse_seconds("opensky", "timeout", v)?;
        }
        config.opensky.username = non_empty(section, "username").map(str::to_string);
        config.opensky.password = non_empty(section, "password").map(str::to_string);
    }

    // [polling] section
    if let Some(section) = ini.section(Some("polling")) {
        if let Some(v) = non_empty(section, "interval") {
            config.polling.interval = parse_seconds("polling", "interval", v)?;
        }
        if let Some(v) = non_empty(section, "viewport_quiet") {
            config.polling.viewport_quiet = match v.parse::<u64>() {
                Ok(secs) if secs <= MAX_INTERVAL_SECS => secs,
                _ => {
                    return Err(ConfigFileError::InvalidValue {
                        section: "polling".to_string(),
                        key: "viewport_quiet".to_string(),
                        value: v.to_string(),
                        reason: format!(
                            "must be an integer from 0 to {} (seconds)",
                            MAX_INTERVAL_SECS
                        ),
                    })
                }
            };
        }
    }

    // [region] section
    if let Some(section) = ini.section(Some("region")) {
        if let Some(v) = non_empty(section, "bounds") {
            config.region.bounds = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "region".to_string(),
                key: "bounds".to_string(),
                value: v.to_string(),
                reason: "expected 'min_lat,min_lon,max_lat,max_lon'".to_string(),
            })?;
        }
    }

    Ok(config)
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn parse_seconds(section: &str, key: &str, value: &str) -> Result<u64, ConfigFileError> {
    match value.parse::<u64>() {
        Ok(secs) if (1..=MAX_INTERVAL_SECS).contains(&secs) => Ok(secs),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: format!("must be an integer from 1 to {} (seconds)", MAX_INTERVAL_SECS),
        }),
    }
}
