//! # linguist-rs-ts
//!
//! Qt Linguist TS catalogue support for linguist-rs: a typed document model,
//! an XML reader and writer, consistency checks, and a loader that registers
//! parsed catalogues with the global runtime registry in `linguist-rs-core`.
//!
//! ## Modules
//!
//! - [`document`] - Typed TS document model and compilation to a runtime catalog
//! - [`reader`] - TS XML parsing
//! - [`writer`] - TS XML serialization
//! - [`check`] - Catalogue consistency checks
//! - [`loader`] - Catalogue discovery, registration, and startup bootstrap

pub mod check;
pub mod document;
pub mod loader;
pub mod reader;
pub mod writer;

pub use check::{check_document, has_errors, CheckLevel, CheckMessage};
pub use document::{
    LineRef, Location, Message, Translation, TranslationStatus, TsContext, TsDocument,
};
pub use loader::{bootstrap, load_catalog, load_directory};
pub use reader::{parse_file, parse_str};
pub use writer::{write_file, write_str};
