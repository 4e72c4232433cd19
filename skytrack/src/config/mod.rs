//! Configuration file handling for `~/.skytrack/config.ini`.
//!
//! # Example
//!
//! ```no_run
//! use skytrack::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let client_config = config.opensky_config();
//! let coordinator_config = config.coordinator_config();
//! # Ok::<(), skytrack::config::ConfigFileError>(())
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use parser::MAX_INTERVAL_SECS;
pub use settings::{ConfigFile, OpenSkySettings, PollingSettings, RegionSettings};
