//! Typed representation of a Qt Linguist TS catalogue.
//!
//! A [`TsDocument`] mirrors the XML structure one-to-one: ordered contexts,
//! each holding ordered messages with location hints, an optional
//! disambiguating comment, and a translation that is either a single text or
//! a list of numerusforms. Documents are produced by the
//! [`reader`](crate::reader), edited by translation tooling, and compiled
//! into a runtime [`Catalog`] for lookup; they are never mutated by the
//! consuming application at runtime.

use linguist_rs_core::catalog::{Catalog, CatalogEntry, TranslationBody};

/// A line reference within a location hint.
///
/// The TS format encodes locations incrementally: the first location of a
/// run carries a filename and an absolute line, later ones carry only a
/// signed offset from the previous reference (`line="+9"`, `line="-737"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
    /// An absolute one-based line number (`line="103"`).
    Absolute(u32),
    /// A signed offset from the previously referenced line (`line="+9"`).
    Relative(i64),
}

impl LineRef {
    /// Parses the TS `line` attribute encoding.
    ///
    /// A leading `+` or `-` marks a relative reference; a bare number is
    /// absolute. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(rest) = value.strip_prefix('+') {
            rest.parse::<i64>().ok().map(Self::Relative)
        } else if value.starts_with('-') {
            value.parse::<i64>().ok().map(Self::Relative)
        } else {
            value.parse::<u32>().ok().map(Self::Absolute)
        }
    }

    /// Renders the reference back into the TS attribute encoding.
    pub fn encode(&self) -> String {
        match self {
            Self::Absolute(line) => line.to_string(),
            Self::Relative(offset) if *offset >= 0 => format!("+{offset}"),
            Self::Relative(offset) => offset.to_string(),
        }
    }
}

/// Provenance metadata pointing at the UI source that produced a message.
///
/// Consumed only by translation tooling; runtime lookup never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// The UI source file, relative to the catalogue (first location of a
    /// run only).
    pub filename: Option<String>,
    /// The line reference, absolute or relative.
    pub line: Option<LineRef>,
}

/// The completion status of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationStatus {
    /// Translated and approved; used at runtime.
    #[default]
    Finished,
    /// Not yet translated or not yet approved; runtime falls back to source.
    Unfinished,
    /// The source string disappeared from the UI; kept for reference.
    Vanished,
    /// Marked obsolete by older tooling; kept for reference.
    Obsolete,
}

impl TranslationStatus {
    /// Parses the `type` attribute of a `<translation>` element.
    ///
    /// An absent attribute means finished.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("unfinished") => Self::Unfinished,
            Some("vanished") => Self::Vanished,
            Some("obsolete") => Self::Obsolete,
            _ => Self::Finished,
        }
    }

    /// The `type` attribute value, or `None` for finished translations.
    pub const fn attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }
}

/// A translation: completion status plus the translated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Whether the translator finished this entry.
    pub status: TranslationStatus,
    /// Single text or ordered numerusforms.
    pub body: TranslationBody,
}

impl Translation {
    /// A finished single-text translation.
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            status: TranslationStatus::Finished,
            body: TranslationBody::Text(text.into()),
        }
    }

    /// An unfinished single-text translation (possibly empty).
    pub fn unfinished(text: impl Into<String>) -> Self {
        Self {
            status: TranslationStatus::Unfinished,
            body: TranslationBody::Text(text.into()),
        }
    }

    /// A finished plural translation with the given ordered forms.
    pub fn plural(forms: Vec<String>) -> Self {
        Self {
            status: TranslationStatus::Finished,
            body: TranslationBody::Plural(forms),
        }
    }
}

/// One translation entry within a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Provenance hints, in document order.
    pub locations: Vec<Location>,
    /// The original-language text; the lookup key.
    pub source: String,
    /// Disambiguating comment; part of the lookup key when present.
    pub comment: Option<String>,
    /// Guidance for the translator; never part of the key.
    pub extracomment: Option<String>,
    /// Whether the translation carries numerusforms.
    pub numerus: bool,
    /// The translation itself.
    pub translation: Translation,
}

impl Message {
    /// Creates a message with no locations or comments.
    pub fn new(source: impl Into<String>, translation: Translation) -> Self {
        let numerus = matches!(translation.body, TranslationBody::Plural(_));
        Self {
            locations: Vec::new(),
            source: source.into(),
            comment: None,
            extracomment: None,
            numerus,
            translation,
        }
    }
}

/// A named group of messages, generally one UI screen or source class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsContext {
    /// The context name (e.g. `ActiveCallBar`, `RoomSettings`).
    pub name: String,
    /// Messages in document order.
    pub messages: Vec<Message>,
}

impl TsContext {
    /// Creates an empty context.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }
}

/// A complete TS catalogue document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsDocument {
    /// The TS format version (e.g. "2.1").
    pub version: String,
    /// The target language code (e.g. "ru").
    pub language: String,
    /// The language the source strings are written in, if recorded.
    pub source_language: Option<String>,
    /// Contexts in document order.
    pub contexts: Vec<TsContext>,
}

impl TsDocument {
    /// Creates an empty document for the given target language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            version: "2.1".to_string(),
            language: language.into(),
            source_language: None,
            contexts: Vec::new(),
        }
    }

    /// Total number of messages across all contexts.
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    /// Compiles this document into a runtime [`Catalog`].
    ///
    /// Vanished and obsolete entries are dropped: they describe strings the
    /// UI no longer contains. Unfinished entries are kept but flagged, so
    /// lookup falls back to source text for them.
    pub fn to_catalog(&self) -> Catalog {
        let mut catalog = Catalog::new(self.language.clone());
        for context in &self.contexts {
            for message in &context.messages {
                let finished = match message.translation.status {
                    TranslationStatus::Finished => true,
                    TranslationStatus::Unfinished => false,
                    TranslationStatus::Vanished | TranslationStatus::Obsolete => continue,
                };
                catalog.insert(
                    context.name.clone(),
                    message.source.clone(),
                    message.comment.as_deref(),
                    CatalogEntry {
                        finished,
                        body: message.translation.body.clone(),
                    },
                );
            }
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ref_parse() {
        assert_eq!(LineRef::parse("103"), Some(LineRef::Absolute(103)));
        assert_eq!(LineRef::parse("+9"), Some(LineRef::Relative(9)));
        assert_eq!(LineRef::parse("-737"), Some(LineRef::Relative(-737)));
        assert_eq!(LineRef::parse("+0"), Some(LineRef::Relative(0)));
        assert_eq!(LineRef::parse("abc"), None);
    }

    #[test]
    fn test_line_ref_encode() {
        assert_eq!(LineRef::Absolute(103).encode(), "103");
        assert_eq!(LineRef::Relative(9).encode(), "+9");
        assert_eq!(LineRef::Relative(-737).encode(), "-737");
        assert_eq!(LineRef::Relative(0).encode(), "+0");
    }

    #[test]
    fn test_status_parse_and_attribute() {
        assert_eq!(TranslationStatus::parse(None), TranslationStatus::Finished);
        assert_eq!(
            TranslationStatus::parse(Some("unfinished")),
            TranslationStatus::Unfinished
        );
        assert_eq!(
            TranslationStatus::parse(Some("vanished")),
            TranslationStatus::Vanished
        );
        assert_eq!(
            TranslationStatus::parse(Some("obsolete")),
            TranslationStatus::Obsolete
        );
        assert_eq!(TranslationStatus::Finished.attribute(), None);
        assert_eq!(TranslationStatus::Unfinished.attribute(), Some("unfinished"));
    }

    #[test]
    fn test_message_new_derives_numerus() {
        let plain = Message::new("Logout", Translation::finished("Выйти"));
        assert!(!plain.numerus);
        let plural = Message::new(
            "%n member(s)",
            Translation::plural(vec!["a".into(), "b".into(), "c".into()]),
        );
        assert!(plural.numerus);
    }

    #[test]
    fn test_to_catalog_skips_vanished_and_flags_unfinished() {
        let mut doc = TsDocument::new("ru");
        let mut context = TsContext::new("ChatPage");
        context.messages.push(Message::new("Logout", Translation::finished("Выйти")));
        context
            .messages
            .push(Message::new("Reply", Translation::unfinished("")));
        context.messages.push(Message::new(
            "Old string",
            Translation {
                status: TranslationStatus::Vanished,
                body: TranslationBody::Text("Старая строка".into()),
            },
        ));
        doc.contexts.push(context);

        let catalog = doc.to_catalog();
        assert_eq!(catalog.translate("ChatPage", "Logout"), Some("Выйти"));
        // Unfinished entries exist but lookup refuses them.
        assert!(catalog.entry("ChatPage", "Reply", None).is_some());
        assert_eq!(catalog.translate("ChatPage", "Reply"), None);
        // Vanished entries are dropped entirely.
        assert!(catalog.entry("ChatPage", "Old string", None).is_none());
    }

    #[test]
    fn test_to_catalog_preserves_comment_keys() {
        let mut doc = TsDocument::new("ru");
        let mut context = TsContext::new("RoomList");
        let mut with_comment = Message::new("Empty Room", Translation::finished("Пустая комната"));
        with_comment.comment = Some("RoomName".to_string());
        context.messages.push(with_comment);
        doc.contexts.push(context);

        let catalog = doc.to_catalog();
        assert_eq!(
            catalog.translate_with_comment("RoomList", "Empty Room", Some("RoomName")),
            Some("Пустая комната")
        );
        assert_eq!(catalog.translate("RoomList", "Empty Room"), None);
    }

    #[test]
    fn test_message_count() {
        let mut doc = TsDocument::new("ru");
        let mut a = TsContext::new("A");
        a.messages.push(Message::new("x", Translation::finished("y")));
        let mut b = TsContext::new("B");
        b.messages.push(Message::new("x", Translation::finished("y")));
        b.messages.push(Message::new("z", Translation::finished("w")));
        doc.contexts.push(a);
        doc.contexts.push(b);
        assert_eq!(doc.message_count(), 3);
    }
}
