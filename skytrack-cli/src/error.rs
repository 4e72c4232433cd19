//! CLI error type with user-facing messages and exit codes.

use std::fmt;

use skytrack::config::ConfigFileError;
use skytrack::region::FetchError;

/// Errors surfaced by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Invalid or inconsistent configuration.
    Config(String),
    /// Config file could not be read or written.
    ConfigFile(ConfigFileError),
    /// Region query failed.
    Fetch(FetchError),
    /// Async runtime or signal handling failure.
    Runtime(String),
}

impl CliError {
    /// Print the error to stderr and exit with a non-zero status.
    pub fn exit(&self) -> ! {
        eprintln!("{} {}", console::style("Error:").red().bold(), self);
        if let CliError::Fetch(FetchError::Unauthorized) = self {
            eprintln!("Check --username/--password or the [opensky] section of config.ini.");
        }
        std::process::exit(1);
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Fetch(e) => write!(f, "{} ({})", e.user_message(), e),
            CliError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Fetch(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}
