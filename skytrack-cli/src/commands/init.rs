//! Init command - write a default configuration file.

use std::path::PathBuf;

use skytrack::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// An existing file is loaded and rewritten so that any missing keys are
/// filled in with defaults while user values are kept.
pub fn run(config_path: Option<PathBuf>) -> Result<(), CliError> {
    let path = config_path.unwrap_or_else(config_file_path);

    let existed = path.exists();
    let config = ConfigFile::load_from(&path)?;
    config.save_to(&path)?;

    if existed {
        println!("Updated configuration file: {}", path.display());
    } else {
        println!("Created configuration file: {}", path.display());
    }
    println!();
    println!("Edit this file to set your OpenSky credentials and default region.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
