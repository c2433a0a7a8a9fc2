//! Core error types for the linguist-rs toolkit.
//!
//! This module provides the toolkit-wide error enum [`LinguistError`] covering
//! catalogue parse errors, XML transport errors, configuration errors, and
//! I/O errors.

use thiserror::Error;

/// The primary error type for the linguist-rs toolkit.
///
/// Each variant maps to a conventional `sysexits`-style process exit code via
/// [`LinguistError::exit_code`], which the management CLI uses when a command
/// fails.
#[derive(Error, Debug)]
pub enum LinguistError {
    // ── Catalogue content ────────────────────────────────────────────

    /// The TS document is structurally invalid (bad nesting, missing
    /// required elements, numerus mismatch).
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The underlying XML could not be read or written.
    #[error("XML error: {0}")]
    XmlError(String),

    /// A catalogue failed validation checks.
    #[error("Validation error: {0}")]
    ValidationError(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LinguistError {
    /// Returns the process exit code associated with this error.
    ///
    /// The mapping follows BSD `sysexits` conventions where applicable:
    ///
    /// - `ParseError`, `XmlError`, `ValidationError` -> 65 (data error)
    /// - `IoError` -> 74 (I/O error)
    /// - `ConfigurationError` -> 78 (configuration error)
    /// - `SerializationError` -> 70 (internal software error)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ParseError(_) | Self::XmlError(_) | Self::ValidationError(_) => 65,
            Self::SerializationError(_) => 70,
            Self::IoError(_) => 74,
            Self::ConfigurationError(_) => 78,
        }
    }
}

/// A convenience type alias for `Result<T, LinguistError>`.
pub type LinguistResult<T> = Result<T, LinguistError>;
