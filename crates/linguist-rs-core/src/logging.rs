//! Logging integration for the linguist-rs toolkit.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-catalogue
//! spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info",
/// "warn", "error"). In debug mode a pretty, human-readable format is used;
/// otherwise a structured JSON format is used. Calling this twice is a no-op
/// on the second call.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for processing one catalogue file.
///
/// Attach this span around parse/check/write passes so that all log entries
/// emitted while handling the file carry its path.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::logging::catalogue_span;
///
/// let span = catalogue_span("resources/langs/app_ru.ts");
/// let _guard = span.enter();
/// tracing::info!("checking catalogue");
/// ```
pub fn catalogue_span(path: &str) -> tracing::Span {
    tracing::info_span!("catalogue", path = path)
}
