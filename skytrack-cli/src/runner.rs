//! Shared setup for commands that talk to OpenSky.
//!
//! Loads the config file, installs logging and builds the Tokio runtime the
//! command runs on.

use std::path::{Path, PathBuf};

use skytrack::config::{config_file_path, ConfigFile};
use skytrack::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};
use tokio::runtime::Runtime;

use crate::error::CliError;

/// Command environment: config, logging guard and async runtime.
pub struct CliRunner {
    config: ConfigFile,
    config_path: PathBuf,
    runtime: Runtime,
    _logging: Option<LoggingGuard>,
}

impl CliRunner {
    /// Load configuration from `config_path` (or the default path) and set up
    /// logging and the runtime.
    ///
    /// Logging failures are reported and otherwise ignored.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, CliError> {
        let config_path = config_path.unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let log_dir = default_log_dir();
        let logging = match init_logging(&log_dir, default_log_file(), "info") {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: logging disabled ({})", e);
                None
            }
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Runtime(format!("Failed to start async runtime: {}", e)))?;

        Ok(Self {
            config,
            config_path,
            runtime,
            _logging: logging,
        })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Runtime to drive async work on.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Log the command invocation.
    pub fn log_startup(&self, command: &str) {
        tracing::info!(
            command,
            version = env!("CARGO_PKG_VERSION"),
            config = %display_path(&self.config_path),
            log_file = %default_log_dir().join(default_log_file()).display(),
            "SkyTrack starting"
        );
    }
}

fn display_path(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    }
}
