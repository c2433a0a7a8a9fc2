//! Built-in management commands.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait and is
//! registered into the CLI at startup by [`register_builtin_commands`].

pub mod check;
pub mod query;
pub mod stats;

pub use check::CheckCommand;
pub use query::QueryCommand;
pub use stats::StatsCommand;

use crate::command::CommandRegistry;

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(StatsCommand));
    registry.register(Box::new(QueryCommand));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_commands_registered() {
        let mut registry = CommandRegistry::new();
        register_builtin_commands(&mut registry);
        assert_eq!(registry.list_commands(), vec!["check", "query", "stats"]);
    }
}
