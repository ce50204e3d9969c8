//! Application runner logic
//!
//! Handles the different ways to run the Zona application

use crate::core::config::{CliArgs, ConfigFile};
use anyhow::Result;

/// Create and run the application with the given CLI arguments.
/// Handles special CLI flags before opening the window.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        match ConfigFile::initialize_config_directory() {
            Ok(()) => {
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("Failed to initialize config directory: {e:#}");
                std::process::exit(1);
            }
        }
    }

    let mut app = crate::core::app::create_app(cli_args)?;
    app.run();
    Ok(())
}
