//! Lazily-translated text.
//!
//! [`LazyText`] defers the catalogue lookup until the value is displayed.
//! This suits module-level constants and UI labels that must be resolved at
//! render time against whatever language the rendering thread has active,
//! not at definition time.

use std::fmt;

/// A lazily-translated piece of UI text.
///
/// The translation is evaluated each time `Display::fmt` is called, using
/// the language active on the calling thread at that moment. Missing or
/// unfinished translations fall back to the source text.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::catalog::{self, Catalog, CatalogEntry};
/// use linguist_rs_core::lazy::LazyText;
///
/// let label = LazyText::new("ChatPage", "Invite users");
/// assert_eq!(label.to_string(), "Invite users");
///
/// let mut ru = Catalog::new("lazy-doc-ru");
/// ru.insert("ChatPage", "Invite users", None, CatalogEntry::text("Пригласить пользователей"));
/// catalog::register_catalog(ru);
///
/// catalog::activate("lazy-doc-ru");
/// assert_eq!(label.to_string(), "Пригласить пользователей");
/// catalog::deactivate();
/// ```
#[derive(Clone)]
pub struct LazyText {
    context: String,
    source: String,
    comment: Option<String>,
}

impl LazyText {
    /// Creates a lazy text for `source` within `context`.
    pub fn new(context: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            comment: None,
        }
    }

    /// Attaches a disambiguating comment to the lookup key.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns the untranslated source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the context this text belongs to.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Evaluates the translation against the current thread's language.
    pub fn evaluate(&self) -> String {
        match &self.comment {
            Some(comment) => crate::catalog::trc(&self.context, &self.source, comment),
            None => crate::catalog::tr(&self.context, &self.source),
        }
    }
}

impl fmt::Display for LazyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.evaluate())
    }
}

impl fmt::Debug for LazyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyText")
            .field("context", &self.context)
            .field("source", &self.source)
            .field("comment", &self.comment)
            .finish()
    }
}

impl PartialEq for LazyText {
    fn eq(&self, other: &Self) -> bool {
        self.context == other.context
            && self.source == other.source
            && self.comment == other.comment
    }
}

impl Eq for LazyText {}

impl From<LazyText> for String {
    fn from(lazy: LazyText) -> Self {
        lazy.evaluate()
    }
}
