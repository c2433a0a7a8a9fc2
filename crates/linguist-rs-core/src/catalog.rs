//! Runtime translation catalog and lookup.
//!
//! A [`Catalog`] holds the finished state of one language's translations,
//! keyed by `(context, source, comment)`. Catalogs are registered into a
//! global, thread-safe registry and selected per thread with [`activate`].
//! The module-level [`tr`], [`trc`], and [`trn`] helpers perform the lookup
//! with fallback: an entry that is missing, unfinished, or empty resolves to
//! the source text, so an incomplete catalogue degrades to the original
//! language rather than failing.
//!
//! Lookup never consults location metadata; that exists only for translation
//! tooling.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::plural::PluralRule;

/// The lookup key of a message within one context.
///
/// Source strings need not be unique within a context; the optional
/// disambiguating comment separates duplicates (e.g. "Encryption" appearing
/// on several screens with different intent).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    /// The original-language text.
    pub source: String,
    /// The disambiguating comment, if the author supplied one.
    pub comment: Option<String>,
}

impl MessageKey {
    /// Creates a key from a source string with no disambiguation.
    pub const fn new(source: String) -> Self {
        Self {
            source,
            comment: None,
        }
    }

    /// Creates a key from a source string and a disambiguating comment.
    pub fn with_comment(source: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            comment: Some(comment.into()),
        }
    }
}

/// The translated body of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationBody {
    /// A single translated text.
    Text(String),
    /// Ordered plural forms, indexed by [`PluralRule::index`].
    Plural(Vec<String>),
}

/// One translation entry: the body plus whether the translator finished it.
///
/// Unfinished entries are kept (tooling needs them) but never returned from
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// `false` for entries still marked `unfinished` by the translator.
    pub finished: bool,
    /// The translated text or plural forms.
    pub body: TranslationBody,
}

impl CatalogEntry {
    /// A finished single-text entry.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            finished: true,
            body: TranslationBody::Text(text.into()),
        }
    }

    /// A finished plural entry with the given ordered forms.
    pub fn plural(forms: Vec<String>) -> Self {
        Self {
            finished: true,
            body: TranslationBody::Plural(forms),
        }
    }

    /// Marks this entry unfinished.
    #[must_use]
    pub fn unfinished(mut self) -> Self {
        self.finished = false;
        self
    }
}

/// A translation catalog for a single language.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::catalog::{Catalog, CatalogEntry};
///
/// let mut catalog = Catalog::new("ru");
/// catalog.insert("ActiveCallBar", "Calling...", None, CatalogEntry::text("Вызов…"));
///
/// assert_eq!(catalog.translate("ActiveCallBar", "Calling..."), Some("Вызов…"));
/// assert_eq!(catalog.translate("ChatPage", "Calling..."), None);
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    language: String,
    rule: PluralRule,
    contexts: HashMap<String, HashMap<MessageKey, CatalogEntry>>,
}

impl Catalog {
    /// Creates an empty catalog for the given target language.
    ///
    /// The plural rule is derived from the language code.
    pub fn new(language: impl Into<String>) -> Self {
        let language = language.into();
        let rule = PluralRule::for_language(&language);
        Self {
            language,
            rule,
            contexts: HashMap::new(),
        }
    }

    /// The target language code this catalog translates into.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The plural rule derived from the catalog language.
    pub const fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    /// Inserts an entry under `(context, source, comment)`.
    ///
    /// An existing entry with the same key is replaced.
    pub fn insert(
        &mut self,
        context: impl Into<String>,
        source: impl Into<String>,
        comment: Option<&str>,
        entry: CatalogEntry,
    ) {
        let key = MessageKey {
            source: source.into(),
            comment: comment.map(ToString::to_string),
        };
        self.contexts
            .entry(context.into())
            .or_default()
            .insert(key, entry);
    }

    /// Returns the entry for the exact `(context, source, comment)` key.
    pub fn entry(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&CatalogEntry> {
        let key = MessageKey {
            source: source.to_string(),
            comment: comment.map(ToString::to_string),
        };
        self.contexts.get(context)?.get(&key)
    }

    /// Looks up a finished single-text translation.
    ///
    /// Returns `None` when the entry is missing, unfinished, pluralized, or
    /// empty; callers then fall back to the source text.
    pub fn translate(&self, context: &str, source: &str) -> Option<&str> {
        self.translate_with_comment(context, source, None)
    }

    /// Looks up a finished single-text translation with a disambiguating
    /// comment.
    pub fn translate_with_comment(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&str> {
        match self.entry(context, source, comment)? {
            CatalogEntry {
                finished: true,
                body: TranslationBody::Text(text),
            } if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Looks up a finished plural translation and selects the form for `n`.
    ///
    /// Every `%n` in the selected form is replaced with the decimal rendering
    /// of `n`. Returns `None` when the entry is missing, unfinished, not
    /// pluralized, or lacks the required form.
    pub fn translate_plural(&self, context: &str, source: &str, n: u64) -> Option<String> {
        self.translate_plural_with_comment(context, source, None, n)
    }

    /// [`translate_plural`](Self::translate_plural) with a disambiguating
    /// comment.
    pub fn translate_plural_with_comment(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: u64,
    ) -> Option<String> {
        match self.entry(context, source, comment)? {
            CatalogEntry {
                finished: true,
                body: TranslationBody::Plural(forms),
            } => {
                let form = forms.get(self.rule.index(n))?;
                if form.is_empty() {
                    None
                } else {
                    Some(substitute_count(form, n))
                }
            }
            _ => None,
        }
    }

    /// Returns the number of entries across all contexts.
    pub fn len(&self) -> usize {
        self.contexts.values().map(HashMap::len).sum()
    }

    /// Returns `true` if the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Returns the context names known to this catalog, unordered.
    pub fn context_names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }
}

/// Replaces every `%n` in `text` with the decimal rendering of `n`.
///
/// This mirrors the count substitution the original Qt consumer applies to
/// numerusforms ("%n участников" -> "5 участников").
pub fn substitute_count(text: &str, n: u64) -> String {
    text.replace("%n", &n.to_string())
}

// ── Global registry and thread-local activation ──────────────────────────

/// The global catalog registry, keyed by language code.
fn global_catalogs() -> &'static RwLock<HashMap<String, Catalog>> {
    static CATALOGS: OnceLock<RwLock<HashMap<String, Catalog>>> = OnceLock::new();
    CATALOGS.get_or_init(|| RwLock::new(HashMap::new()))
}

thread_local! {
    static CURRENT_LANGUAGE: std::cell::RefCell<Option<String>> =
        const { std::cell::RefCell::new(None) };
}

/// Registers a catalog under its own language code.
///
/// A previously registered catalog for the same language is replaced.
pub fn register_catalog(catalog: Catalog) {
    let mut catalogs = global_catalogs().write().expect("catalog lock poisoned");
    tracing::debug!(
        language = %catalog.language(),
        entries = catalog.len(),
        "registering catalog"
    );
    catalogs.insert(catalog.language().to_string(), catalog);
}

/// Removes the catalog registered for the given language, if any.
pub fn unregister_language(language: &str) {
    let mut catalogs = global_catalogs().write().expect("catalog lock poisoned");
    catalogs.remove(language);
}

/// Returns `true` if a catalog is registered for the given language.
pub fn has_language(language: &str) -> bool {
    let catalogs = global_catalogs().read().expect("catalog lock poisoned");
    catalogs.contains_key(language)
}

/// Returns the language codes of all registered catalogs.
pub fn available_languages() -> Vec<String> {
    let catalogs = global_catalogs().read().expect("catalog lock poisoned");
    catalogs.keys().cloned().collect()
}

/// Activates the given language for the current thread.
///
/// Subsequent [`tr`], [`trc`], and [`trn`] calls on this thread resolve
/// against the catalog registered for that language.
pub fn activate(language: &str) {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = Some(language.to_string());
    });
}

/// Deactivates the current thread's language, reverting to source text.
pub fn deactivate() {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Returns the language active on the current thread, if any.
pub fn active_language() -> Option<String> {
    CURRENT_LANGUAGE.with(|cell| cell.borrow().clone())
}

fn with_active_catalog<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&Catalog) -> Option<R>,
{
    let language = active_language()?;
    let catalogs = global_catalogs().read().expect("catalog lock poisoned");
    catalogs.get(&language).and_then(f)
}

/// Translates `source` within `context` using the active language.
///
/// Falls back to `source` when no finished translation exists.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::catalog::{self, Catalog, CatalogEntry};
///
/// let mut ru = Catalog::new("doc-tr-ru");
/// ru.insert("ChatPage", "Logout", None, CatalogEntry::text("Выйти"));
/// catalog::register_catalog(ru);
///
/// catalog::activate("doc-tr-ru");
/// assert_eq!(catalog::tr("ChatPage", "Logout"), "Выйти");
/// assert_eq!(catalog::tr("ChatPage", "Unknown"), "Unknown");
/// catalog::deactivate();
/// ```
pub fn tr(context: &str, source: &str) -> String {
    with_active_catalog(|catalog| catalog.translate(context, source).map(ToString::to_string))
        .unwrap_or_else(|| source.to_string())
}

/// Translates `source` within `context`, disambiguated by `comment`.
///
/// Falls back to `source` when no finished translation exists.
pub fn trc(context: &str, source: &str, comment: &str) -> String {
    with_active_catalog(|catalog| {
        catalog
            .translate_with_comment(context, source, Some(comment))
            .map(ToString::to_string)
    })
    .unwrap_or_else(|| source.to_string())
}

/// Translates a pluralized `source` within `context` for count `n`.
///
/// Falls back to `source` with `%n` substituted when no finished plural
/// translation exists.
pub fn trn(context: &str, source: &str, n: u64) -> String {
    with_active_catalog(|catalog| catalog.translate_plural(context, source, n))
        .unwrap_or_else(|| substitute_count(source, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_catalog(language: &str) -> Catalog {
        let mut catalog = Catalog::new(language);
        catalog.insert(
            "RoomInfo",
            "%n member(s)",
            None,
            CatalogEntry::plural(vec![
                "%n участник".to_string(),
                "%n участника".to_string(),
                "%n участников".to_string(),
            ]),
        );
        catalog
    }

    #[test]
    fn test_translate_basic() {
        let mut catalog = Catalog::new("ru");
        catalog.insert("ActiveCallBar", "Calling...", None, CatalogEntry::text("Вызов…"));
        assert_eq!(catalog.translate("ActiveCallBar", "Calling..."), Some("Вызов…"));
        assert_eq!(catalog.translate("ActiveCallBar", "Connecting..."), None);
    }

    #[test]
    fn test_translate_unfinished_is_none() {
        let mut catalog = Catalog::new("ru");
        catalog.insert(
            "LoginPage",
            "Device name",
            None,
            CatalogEntry::text("Имя устройства").unfinished(),
        );
        assert_eq!(catalog.translate("LoginPage", "Device name"), None);
    }

    #[test]
    fn test_translate_empty_finished_is_none() {
        let mut catalog = Catalog::new("ru");
        catalog.insert("LoginPage", "Matrix ID", None, CatalogEntry::text(""));
        assert_eq!(catalog.translate("LoginPage", "Matrix ID"), None);
    }

    #[test]
    fn test_duplicate_sources_across_contexts_resolve_independently() {
        let mut catalog = Catalog::new("ru");
        catalog.insert("RoomSettings", "Encryption", None, CatalogEntry::text("Шифрование"));
        catalog.insert("UserProfile", "Encryption", None, CatalogEntry::text("Шифрование!"));
        assert_eq!(catalog.translate("RoomSettings", "Encryption"), Some("Шифрование"));
        assert_eq!(catalog.translate("UserProfile", "Encryption"), Some("Шифрование!"));
    }

    #[test]
    fn test_comment_disambiguates_duplicates_within_context() {
        let mut catalog = Catalog::new("ru");
        catalog.insert(
            "Timeline",
            "May",
            Some("month"),
            CatalogEntry::text("Май"),
        );
        catalog.insert(
            "Timeline",
            "May",
            Some("verb"),
            CatalogEntry::text("Может"),
        );
        assert_eq!(
            catalog.translate_with_comment("Timeline", "May", Some("month")),
            Some("Май")
        );
        assert_eq!(
            catalog.translate_with_comment("Timeline", "May", Some("verb")),
            Some("Может")
        );
        // A comment-less lookup does not match commented entries.
        assert_eq!(catalog.translate("Timeline", "May"), None);
    }

    #[test]
    fn test_translate_plural_russian_forms() {
        let catalog = member_catalog("ru");
        assert_eq!(
            catalog.translate_plural("RoomInfo", "%n member(s)", 1),
            Some("1 участник".to_string())
        );
        assert_eq!(
            catalog.translate_plural("RoomInfo", "%n member(s)", 3),
            Some("3 участника".to_string())
        );
        assert_eq!(
            catalog.translate_plural("RoomInfo", "%n member(s)", 11),
            Some("11 участников".to_string())
        );
        assert_eq!(
            catalog.translate_plural("RoomInfo", "%n member(s)", 21),
            Some("21 участник".to_string())
        );
    }

    #[test]
    fn test_translate_plural_missing_form_is_none() {
        let mut catalog = Catalog::new("ru");
        catalog.insert(
            "RoomInfo",
            "%n member(s)",
            None,
            CatalogEntry::plural(vec!["%n участник".to_string()]),
        );
        // Russian needs index 2 for n=5 but only one form exists.
        assert_eq!(catalog.translate_plural("RoomInfo", "%n member(s)", 5), None);
    }

    #[test]
    fn test_translate_plural_on_text_entry_is_none() {
        let mut catalog = Catalog::new("ru");
        catalog.insert("RoomInfo", "Members", None, CatalogEntry::text("Участники"));
        assert_eq!(catalog.translate_plural("RoomInfo", "Members", 2), None);
    }

    #[test]
    fn test_substitute_count() {
        assert_eq!(substitute_count("%n unread", 7), "7 unread");
        assert_eq!(substitute_count("no placeholder", 7), "no placeholder");
        assert_eq!(substitute_count("%n of %n", 2), "2 of 2");
    }

    #[test]
    fn test_len_and_context_names() {
        let mut catalog = Catalog::new("ru");
        assert!(catalog.is_empty());
        catalog.insert("A", "x", None, CatalogEntry::text("y"));
        catalog.insert("B", "x", None, CatalogEntry::text("z"));
        assert_eq!(catalog.len(), 2);
        let mut names: Vec<_> = catalog.context_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_registry_tr_fallback_without_activation() {
        deactivate();
        assert_eq!(tr("ChatPage", "Leave room"), "Leave room");
    }

    #[test]
    fn test_registry_tr_with_activation() {
        let mut catalog = Catalog::new("test_tr_ru");
        catalog.insert("ChatPage", "Leave room", None, CatalogEntry::text("Покинуть комнату"));
        register_catalog(catalog);

        activate("test_tr_ru");
        assert_eq!(tr("ChatPage", "Leave room"), "Покинуть комнату");
        assert_eq!(tr("ChatPage", "Not present"), "Not present");
        deactivate();
        assert_eq!(tr("ChatPage", "Leave room"), "Leave room");
    }

    #[test]
    fn test_registry_trc() {
        let mut catalog = Catalog::new("test_trc_ru");
        catalog.insert(
            "ChatPage",
            "Hidden",
            Some("Room visibility"),
            CatalogEntry::text("Скрытая"),
        );
        register_catalog(catalog);

        activate("test_trc_ru");
        assert_eq!(trc("ChatPage", "Hidden", "Room visibility"), "Скрытая");
        assert_eq!(trc("ChatPage", "Hidden", "other comment"), "Hidden");
        deactivate();
    }

    #[test]
    fn test_registry_trn_fallback_substitutes_count() {
        deactivate();
        assert_eq!(trn("ChatPage", "%n unread message(s)", 4), "4 unread message(s)");
    }

    #[test]
    fn test_registry_trn_with_catalog() {
        register_catalog(member_catalog("test_trn_ru"));
        activate("test_trn_ru");
        assert_eq!(trn("RoomInfo", "%n member(s)", 2), "2 участника");
        deactivate();
    }

    #[test]
    fn test_registry_bookkeeping() {
        register_catalog(Catalog::new("test_keep_xx"));
        assert!(has_language("test_keep_xx"));
        assert!(available_languages().contains(&"test_keep_xx".to_string()));
        unregister_language("test_keep_xx");
        assert!(!has_language("test_keep_xx"));
    }

    #[test]
    fn test_activate_unknown_language_falls_back() {
        activate("test_unreg_zz");
        assert_eq!(tr("ChatPage", "Reply"), "Reply");
        deactivate();
    }
}
