//! Settings for the linguist-rs toolkit.
//!
//! [`Settings`] holds the configuration shared by the runtime loader and the
//! management CLI. Values come from `linguist.toml` (see
//! [`settings_loader`](crate::settings_loader)) with environment overrides;
//! every field has a default so an absent file is not an error.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};

use serde::{Deserialize, Serialize};

/// The complete set of toolkit settings.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.language_code, "en");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs, verbose diagnostics).
    pub debug: bool,
    /// The log level passed to the tracing filter (e.g. "info", "debug").
    pub log_level: String,

    // ── Localization ─────────────────────────────────────────────────

    /// The language activated by default (e.g. "ru").
    pub language_code: String,
    /// The language catalogue sources are written in.
    pub source_language: String,
    /// Directories scanned for `*.ts` catalogues at startup.
    pub locale_paths: Vec<PathBuf>,

    // ── Checks ───────────────────────────────────────────────────────

    /// Whether placeholder warnings cause the `check` command to fail.
    pub strict_placeholders: bool,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            language_code: "en".to_string(),
            source_language: "en".to_string(),
            locale_paths: Vec::new(),
            strict_placeholders: false,
            extra: HashMap::new(),
        }
    }
}

/// The globally-configured settings instance.
fn global_settings() -> &'static RwLock<Settings> {
    static SETTINGS: OnceLock<RwLock<Settings>> = OnceLock::new();
    SETTINGS.get_or_init(|| RwLock::new(Settings::default()))
}

/// Installs the given settings as the global instance.
pub fn configure(settings: Settings) {
    let mut current = global_settings().write().expect("settings lock poisoned");
    *current = settings;
}

/// Returns a snapshot of the global settings.
pub fn current() -> Settings {
    global_settings()
        .read()
        .expect("settings lock poisoned")
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.language_code, "en");
        assert_eq!(settings.source_language, "en");
        assert!(settings.locale_paths.is_empty());
        assert!(!settings.strict_placeholders);
    }

    #[test]
    fn test_serde_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
            language_code = "ru"
            locale_paths = ["resources/langs"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.language_code, "ru");
        assert_eq!(settings.locale_paths, vec![PathBuf::from("resources/langs")]);
        // Unspecified fields keep their defaults.
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_configure_and_current() {
        let snapshot = current();
        let mut settings = Settings::default();
        settings.language_code = "configured_test".to_string();
        configure(settings);
        assert_eq!(current().language_code, "configured_test");
        // Restore whatever was there so other tests see a sane global.
        configure(snapshot);
    }
}
