//! Management command framework for the linguist CLI.
//!
//! This module provides the [`ManagementCommand`] trait for defining CLI
//! commands and [`CommandRegistry`] for registering and discovering them.
//!
//! ## Defining a Custom Command
//!
//! ```rust,no_run
//! use linguist_rs_cli::command::ManagementCommand;
//! use linguist_rs_core::{LinguistError, Settings};
//!
//! struct ListLanguagesCommand;
//!
//! impl ManagementCommand for ListLanguagesCommand {
//!     fn name(&self) -> &str { "languages" }
//!     fn help(&self) -> &str { "List registered languages" }
//!
//!     fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         _settings: &Settings,
//!     ) -> Result<(), LinguistError> {
//!         println!("en, ru");
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::HashMap;

use linguist_rs_core::{LinguistError, Settings};

/// A management command that can be registered and invoked through the CLI.
///
/// Implementations define a name, help text, optional arguments, and a
/// handler function. All commands must be `Send + Sync` so the registry can
/// be shared freely.
pub trait ManagementCommand: Send + Sync {
    /// Returns the name of this command (used to invoke it from the CLI).
    fn name(&self) -> &str;

    /// Returns a short help description for this command.
    fn help(&self) -> &str;

    /// Adds custom arguments to the clap command.
    ///
    /// Override this to add positional arguments, flags, or options.
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command with the given argument matches and settings.
    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), LinguistError>;
}

/// A registry of management commands.
///
/// Commands are registered by name and can be looked up, listed, or executed.
/// This is the central dispatcher for the `linguist` CLI.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a management command.
    ///
    /// If a command with the same name already exists, it is replaced.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        let name = command.name().to_string();
        self.commands.insert(name, command);
    }

    /// Returns a reference to the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns a sorted list of all registered command names.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds a top-level clap `Command` containing all registered subcommands.
    ///
    /// Collects command metadata (name, help text, arguments) into owned
    /// values so that the resulting `clap::Command` is independent of `&self`.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("linguist")
            .about("linguist-rs catalogue management utility")
            .subcommand_required(true);

        // Collect entries and sort by name
        let mut entries: Vec<_> = self.commands.iter().collect();
        entries.sort_by_key(|(name, _)| (*name).clone());

        for (name, cmd) in entries {
            // clap requires &'static str for command names. We leak the string
            // to satisfy this. Commands are registered once at startup, so the
            // leak is bounded and acceptable.
            let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
            let subcmd = clap::Command::new(static_name).about(cmd.help().to_string());
            let subcmd = cmd.add_arguments(subcmd);
            app = app.subcommand(subcmd);
        }

        app
    }

    /// Executes the command identified by the given argument matches.
    ///
    /// Looks up the subcommand name from `matches` and dispatches to the
    /// registered command's `handle` method.
    pub fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), LinguistError> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            LinguistError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self.get(name).ok_or_else(|| {
            LinguistError::ConfigurationError(format!("Unknown command: {name}"))
        })?;

        cmd.handle(sub_matches, settings)
    }
}
