//! # linguist-rs
//!
//! A Qt Linguist translation-catalogue toolkit for Rust.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `linguist-rs` to get the whole toolkit, or on the
//! individual crates for finer-grained control.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use linguist_rs::core::catalog::{activate, register_catalog, tr, trn};
//! use linguist_rs::ts::loader::load_catalog;
//!
//! # fn main() -> Result<(), linguist_rs::core::LinguistError> {
//! register_catalog(load_catalog("locales/app_ru.ts")?);
//! activate("ru");
//!
//! assert_eq!(tr("ChatPage", "Logout"), "Выйти");
//! assert_eq!(trn("RoomInfo", "%n member(s)", 5), "5 участников");
//! # Ok(())
//! # }
//! ```

/// Core types: runtime catalog, plural rules, settings, errors, logging.
pub use linguist_rs_core as core;

/// TS catalogue support: document model, reader, writer, checks, loader.
pub use linguist_rs_ts as ts;

/// Management commands (CLI).
#[cfg(feature = "cli")]
pub use linguist_rs_cli as cli;
