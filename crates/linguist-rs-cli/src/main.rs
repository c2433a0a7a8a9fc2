//! Entry point for the `linguist` management CLI.
//!
//! Settings come from `linguist.toml` in the working directory when present,
//! otherwise from `LINGUIST_*` environment variables alone.

use std::path::Path;

use linguist_rs_cli::command::CommandRegistry;
use linguist_rs_cli::commands::register_builtin_commands;
use linguist_rs_core::settings::{self, Settings};
use linguist_rs_core::{logging, settings_loader, LinguistError};

const SETTINGS_FILE: &str = "linguist.toml";

fn load_settings() -> Result<Settings, LinguistError> {
    if Path::new(SETTINGS_FILE).is_file() {
        settings_loader::from_toml_file_with_env(SETTINGS_FILE)
    } else {
        Ok(settings_loader::from_env())
    }
}

fn run() -> Result<(), LinguistError> {
    let loaded = load_settings()?;
    logging::setup_logging(&loaded);
    settings::configure(loaded.clone());

    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);

    let matches = registry.build_cli().get_matches();
    registry.execute(&matches, &loaded)
}

fn main() {
    if let Err(e) = run() {
        tracing::error!("{e}");
        std::process::exit(e.exit_code());
    }
}
