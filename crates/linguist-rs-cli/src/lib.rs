//! # linguist-rs-cli
//!
//! The `linguist` management CLI: a command framework plus the built-in
//! `check`, `stats`, and `query` commands for working with TS catalogues.
//!
//! ## Modules
//!
//! - [`command`] - The [`ManagementCommand`](command::ManagementCommand)
//!   trait and [`CommandRegistry`](command::CommandRegistry)
//! - [`commands`] - Built-in commands

pub mod command;
pub mod commands;

pub use command::{CommandRegistry, ManagementCommand};
pub use commands::register_builtin_commands;
