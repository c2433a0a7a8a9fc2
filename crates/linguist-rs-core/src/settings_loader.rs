//! Settings loading from configuration files and the environment.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a `linguist.toml` file (overriding defaults; missing keys
//!    keep their defaults via `#[serde(default)]`).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `LINGUIST_DEBUG` | `debug` |
//! | `LINGUIST_LOG_LEVEL` | `log_level` |
//! | `LINGUIST_LANGUAGE_CODE` | `language_code` |
//! | `LINGUIST_SOURCE_LANGUAGE` | `source_language` |
//! | `LINGUIST_LOCALE_PATHS` | `locale_paths` (comma-separated) |
//! | `LINGUIST_STRICT_PLACEHOLDERS` | `strict_placeholders` |

use std::path::Path;

use crate::error::LinguistError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, LinguistError> {
    toml::from_str(toml_str)
        .map_err(|e| LinguistError::ConfigurationError(format!("Failed to parse TOML: {e}")))
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, LinguistError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        LinguistError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, LinguistError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("LINGUIST_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("LINGUIST_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("LINGUIST_LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Ok(val) = std::env::var("LINGUIST_SOURCE_LANGUAGE") {
        settings.source_language = val;
    }

    if let Ok(val) = std::env::var("LINGUIST_LOCALE_PATHS") {
        settings.locale_paths = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Into::into)
            .collect();
    }

    if let Ok(val) = std::env::var("LINGUIST_STRICT_PLACEHOLDERS") {
        settings.strict_placeholders = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_toml_str_basic() {
        let settings = from_toml_str(
            r#"
            debug = false
            language_code = "ru"
            locale_paths = ["resources/langs", "extra/langs"]
            "#,
        )
        .unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.language_code, "ru");
        assert_eq!(settings.locale_paths.len(), 2);
        // Defaults preserved
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.source_language, "en");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.language_code, "en");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        assert!(from_toml_str("[[invalid toml content").is_err());
    }

    #[test]
    fn test_from_toml_file_missing() {
        assert!(from_toml_file("/nonexistent/path/linguist.toml").is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = std::env::temp_dir().join("linguist_rs_test_toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("linguist.toml");
        std::fs::write(&path, "language_code = \"uk\"\nstrict_placeholders = true\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.language_code, "uk");
        assert!(settings.strict_placeholders);

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut settings = Settings::default();
        std::env::set_var("LINGUIST_LANGUAGE_CODE", "be");
        std::env::set_var("LINGUIST_LOCALE_PATHS", "a/langs, b/langs");
        std::env::set_var("LINGUIST_DEBUG", "false");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.language_code, "be");
        assert_eq!(
            settings.locale_paths,
            vec![PathBuf::from("a/langs"), PathBuf::from("b/langs")]
        );
        assert!(!settings.debug);
        std::env::remove_var("LINGUIST_LANGUAGE_CODE");
        std::env::remove_var("LINGUIST_LOCALE_PATHS");
        std::env::remove_var("LINGUIST_DEBUG");
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("LINGUIST_STRICT_PLACEHOLDERS", "yes");
        let settings = from_env();
        assert!(settings.strict_placeholders);
        std::env::remove_var("LINGUIST_STRICT_PLACEHOLDERS");
    }
}
