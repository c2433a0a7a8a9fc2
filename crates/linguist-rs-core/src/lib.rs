//! # linguist-rs-core
//!
//! Core types for the linguist-rs toolkit: the runtime translation catalog,
//! locale plural rules, lazy text, settings, and error types. This crate has
//! no XML dependency; parsing TS catalogues lives in `linguist-rs-ts`.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result alias
//! - [`plural`] - Locale plural-category rules
//! - [`catalog`] - Runtime catalog, global registry, `tr`/`trc`/`trn`
//! - [`lazy`] - Display-time translation
//! - [`settings`] - Toolkit settings and global configuration
//! - [`settings_loader`] - TOML + environment settings loading
//! - [`logging`] - Tracing-based logging integration

pub mod catalog;
pub mod error;
pub mod lazy;
pub mod logging;
pub mod plural;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use catalog::{Catalog, CatalogEntry, MessageKey, TranslationBody};
pub use error::{LinguistError, LinguistResult};
pub use plural::PluralRule;
pub use settings::Settings;
