//! Catalogue discovery and registration.
//!
//! Scans the configured locale directories for `*.ts` catalogues, parses
//! them, compiles each into a runtime [`Catalog`], and registers it with the
//! global catalog registry. Applications call [`bootstrap`] once at startup
//! and then use `tr`/`trc`/`trn` everywhere else.

use std::path::Path;

use tracing::{debug, info, warn};

use linguist_rs_core::catalog::{self, Catalog};
use linguist_rs_core::error::LinguistResult;
use linguist_rs_core::logging::catalogue_span;
use linguist_rs_core::settings::Settings;

use crate::reader::parse_file;

/// Parses and compiles a single catalogue file.
pub fn load_catalog(path: impl AsRef<Path>) -> LinguistResult<Catalog> {
    let path = path.as_ref();
    let span = catalogue_span(&path.display().to_string());
    let _guard = span.enter();

    let doc = parse_file(path)?;
    let catalog = doc.to_catalog();
    debug!(
        language = catalog.language(),
        entries = catalog.len(),
        "compiled catalogue"
    );
    Ok(catalog)
}

/// Loads every `*.ts` catalogue in a directory and registers each one.
///
/// Returns the language codes registered, in no particular order. Files that
/// fail to parse are skipped with a warning so one broken catalogue does not
/// take down the rest of the application's languages.
pub fn load_directory(dir: impl AsRef<Path>) -> LinguistResult<Vec<String>> {
    let dir = dir.as_ref();
    let mut languages = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("ts") {
            continue;
        }
        match load_catalog(&path) {
            Ok(catalog) => {
                let language = catalog.language().to_string();
                catalog::register_catalog(catalog);
                languages.push(language);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable catalogue");
            }
        }
    }

    Ok(languages)
}

/// Loads all catalogues named by the settings and activates the configured
/// language.
///
/// Missing locale directories are skipped with a warning rather than treated
/// as fatal; a freshly checked-out application may not ship every locale.
pub fn bootstrap(settings: &Settings) -> LinguistResult<Vec<String>> {
    let mut languages = Vec::new();
    for dir in &settings.locale_paths {
        if !dir.is_dir() {
            warn!(path = %dir.display(), "locale path is not a directory, skipping");
            continue;
        }
        languages.extend(load_directory(dir)?);
    }

    if catalog::has_language(&settings.language_code) {
        catalog::activate(&settings.language_code);
        info!(language = settings.language_code, "activated language");
    } else if settings.language_code != settings.source_language {
        warn!(
            language = settings.language_code,
            "no catalogue for configured language, falling back to source strings"
        );
    }

    Ok(languages)
}
