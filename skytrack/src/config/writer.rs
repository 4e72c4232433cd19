//! INI serialization logic for converting `ConfigFile` → INI string.

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
///
/// Values are written verbatim and read back the same way. Values that cannot
/// survive that (line breaks, surrounding whitespace, a trailing backslash
/// which INI treats as a line continuation) are rejected.
pub(super) fn to_config_string(config: &ConfigFile) -> Result<String, ConfigFileError> {
    let base_url = verbatim("opensky", "base_url", &config.opensky.base_url)?;
    let username = config.opensky.username.as_deref().unwrap_or("");
    let username = verbatim("opensky", "username", username)?;
    let password = config.opensky.password.as_deref().unwrap_or("");
    let password = verbatim("opensky", "password", password)?;

    Ok(format!(
        r#"[opensky]
; OpenSky Network REST API root
base_url = {}
; Request timeout in seconds
timeout = {}
; Optional OpenSky account (anonymous access when empty)
username = {}
password = {}

[polling]
; Seconds between periodic refreshes
interval = {}
; Minimum seconds between viewport-triggered refreshes
viewport_quiet = {}

[region]
; Startup region: min_lat,min_lon,max_lat,max_lon
bounds = {}
"#,
        base_url,
        config.opensky.timeout,
        username,
        password,
        config.polling.interval,
        config.polling.viewport_quiet,
        config.region.bounds,
    ))
}

fn verbatim<'a>(section: &str, key: &str, value: &'a str) -> Result<&'a str, ConfigFileError> {
    let reason = if value.contains(['\n', '\r']) {
        Some("contains a line break")
    } else if value.trim() != value {
        Some("has leading or trailing whitespace")
    } else if value.ends_with('\\') {
        Some("ends with a backslash")
    } else {
        None
    };

    match reason {
        None => Ok(value),
        Some(reason) => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            // Never echo secrets into error messages.
            value: if key == "password" { "***".to_string() } else { value.to_string() },
            reason: format!("cannot be stored in config.ini: {}", reason),
        }),
    }
}
