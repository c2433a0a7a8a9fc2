//! TS XML reading.
//!
//! A pull parser over `quick-xml` events that builds a [`TsDocument`].
//! Unknown elements and attributes are skipped (newer TS versions add
//! elements we do not model); structural violations such as a message
//! without a `<source>` are hard errors.

use std::fmt::Display;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use linguist_rs_core::catalog::TranslationBody;
use linguist_rs_core::error::{LinguistError, LinguistResult};

use crate::document::{
    LineRef, Location, Message, Translation, TranslationStatus, TsContext, TsDocument,
};

/// Parses a TS catalogue from a string.
pub fn parse_str(input: &str) -> LinguistResult<TsDocument> {
    DocumentParser::new().run(Reader::from_reader(input.as_bytes()))
}

/// Parses a TS catalogue from a file.
pub fn parse_file(path: impl AsRef<Path>) -> LinguistResult<TsDocument> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_str(&content)
}

fn xml_err(e: impl Display) -> LinguistError {
    LinguistError::XmlError(e.to_string())
}

/// Reads an attribute value, entity-unescaped, if present.
fn attribute(element: &BytesStart<'_>, name: &str) -> LinguistResult<Option<String>> {
    element
        .try_get_attribute(name)
        .map_err(xml_err)?
        .map(|attr| attr.unescape_value().map(|v| v.into_owned()).map_err(xml_err))
        .transpose()
}

/// Which text-bearing leaf element the parser is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    None,
    ContextName,
    Source,
    Comment,
    ExtraComment,
    TranslationText,
    NumerusForm,
}

/// Accumulates one `<message>` while its children stream past.
#[derive(Debug, Default)]
struct MessageBuilder {
    locations: Vec<Location>,
    source: Option<String>,
    comment: Option<String>,
    extracomment: Option<String>,
    numerus: bool,
    translation: Option<Translation>,
}

struct DocumentParser {
    version: String,
    language: String,
    source_language: Option<String>,
    contexts: Vec<TsContext>,
    context_name: Option<String>,
    messages: Vec<Message>,
    message: Option<MessageBuilder>,
    status: TranslationStatus,
    forms: Vec<String>,
    target: Target,
    text_buf: String,
    trans_buf: String,
}

impl DocumentParser {
    fn new() -> Self {
        Self {
            version: "2.1".to_string(),
            language: String::new(),
            source_language: None,
            contexts: Vec::new(),
            context_name: None,
            messages: Vec::new(),
            message: None,
            status: TranslationStatus::Finished,
            forms: Vec::new(),
            target: Target::None,
            text_buf: String::new(),
            trans_buf: String::new(),
        }
    }

    fn run(mut self, mut reader: Reader<&[u8]>) -> LinguistResult<TsDocument> {
        let mut buf = Vec::new();
        // Open-element stack; a non-empty stack at EOF means the document
        // was truncated.
        let mut open: Vec<String> = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).map_err(xml_err)? {
                Event::Start(e) => {
                    open.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                    self.handle_start(&e, false)?;
                }
                Event::Empty(e) => self.handle_start(&e, true)?,
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    open.pop();
                    self.handle_end(&name)?;
                }
                Event::Text(t) => {
                    if self.target != Target::None {
                        let text = t.decode().map_err(xml_err)?;
                        self.push_text(&text);
                    }
                }
                Event::GeneralRef(r) => {
                    if self.target != Target::None {
                        let raw = r.decode().map_err(xml_err)?;
                        let name = raw.trim_start_matches('&').trim_end_matches(';');
                        match resolve_entity(name) {
                            Some(resolved) => self.push_text(&resolved),
                            None => {
                                return Err(LinguistError::ParseError(format!(
                                    "unknown entity reference '&{name};'"
                                )))
                            }
                        }
                    }
                }
                Event::Eof => {
                    if let Some(element) = open.last() {
                        return Err(LinguistError::ParseError(format!(
                            "unexpected end of document inside <{element}>"
                        )));
                    }
                    break;
                }
                // Declaration, doctype, comments, CDATA, PIs carry nothing we model.
                _ => {}
            }
            buf.clear();
        }

        if self.language.is_empty() {
            tracing::debug!("TS element carries no language attribute, assuming \"en\"");
            self.language = "en".to_string();
        }

        Ok(TsDocument {
            version: self.version,
            language: self.language,
            source_language: self.source_language,
            contexts: self.contexts,
        })
    }

    fn push_text(&mut self, text: &str) {
        if self.target == Target::TranslationText {
            self.trans_buf.push_str(text);
        } else {
            self.text_buf.push_str(text);
        }
    }

    fn context_label(&self) -> String {
        self.context_name
            .clone()
            .unwrap_or_else(|| "<unnamed>".to_string())
    }

    fn handle_start(&mut self, e: &BytesStart<'_>, empty: bool) -> LinguistResult<()> {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        match name.as_str() {
            "TS" => {
                if let Some(version) = attribute(e, "version")? {
                    self.version = version;
                }
                if let Some(language) = attribute(e, "language")? {
                    self.language = language;
                }
                self.source_language = attribute(e, "sourcelanguage")?;
            }
            "context" => {
                self.context_name = None;
                self.messages = Vec::new();
            }
            "name" if self.message.is_none() => {
                self.text_buf.clear();
                self.target = Target::ContextName;
                if empty {
                    self.handle_end("name")?;
                }
            }
            "message" => {
                let numerus = attribute(e, "numerus")?.as_deref() == Some("yes");
                self.message = Some(MessageBuilder {
                    numerus,
                    ..MessageBuilder::default()
                });
                if empty {
                    self.handle_end("message")?;
                }
            }
            "location" => {
                let filename = attribute(e, "filename")?;
                let line = attribute(e, "line")?.as_deref().and_then(LineRef::parse);
                if let Some(message) = self.message.as_mut() {
                    message.locations.push(Location { filename, line });
                }
                // <location> is conventionally self-closing; a Start form
                // carries no text either, so nothing more to capture.
            }
            "source" if self.message.is_some() => {
                self.text_buf.clear();
                self.target = Target::Source;
                if empty {
                    self.handle_end("source")?;
                }
            }
            "comment" if self.message.is_some() => {
                self.text_buf.clear();
                self.target = Target::Comment;
                if empty {
                    self.handle_end("comment")?;
                }
            }
            "extracomment" if self.message.is_some() => {
                self.text_buf.clear();
                self.target = Target::ExtraComment;
                if empty {
                    self.handle_end("extracomment")?;
                }
            }
            "translation" if self.message.is_some() => {
                self.status = TranslationStatus::parse(attribute(e, "type")?.as_deref());
                self.forms = Vec::new();
                self.trans_buf.clear();
                self.target = Target::TranslationText;
                if empty {
                    self.handle_end("translation")?;
                }
            }
            "numerusform" => {
                self.text_buf.clear();
                self.target = Target::NumerusForm;
                if empty {
                    self.handle_end("numerusform")?;
                }
            }
            other => {
                tracing::debug!(element = other, "skipping unknown TS element");
            }
        }
        Ok(())
    }

    fn handle_end(&mut self, name: &str) -> LinguistResult<()> {
        match name {
            "name" if self.target == Target::ContextName => {
                self.context_name = Some(std::mem::take(&mut self.text_buf));
                self.target = Target::None;
            }
            "source" if self.target == Target::Source => {
                if let Some(message) = self.message.as_mut() {
                    message.source = Some(std::mem::take(&mut self.text_buf));
                }
                self.target = Target::None;
            }
            "comment" if self.target == Target::Comment => {
                if let Some(message) = self.message.as_mut() {
                    message.comment = Some(std::mem::take(&mut self.text_buf));
                }
                self.target = Target::None;
            }
            "extracomment" if self.target == Target::ExtraComment => {
                if let Some(message) = self.message.as_mut() {
                    message.extracomment = Some(std::mem::take(&mut self.text_buf));
                }
                self.target = Target::None;
            }
            "numerusform" if self.target == Target::NumerusForm => {
                self.forms.push(std::mem::take(&mut self.text_buf));
                self.target = Target::TranslationText;
            }
            "translation" => {
                self.finish_translation()?;
                self.target = Target::None;
            }
            "message" => {
                let builder = self.message.take().ok_or_else(|| {
                    LinguistError::ParseError("unexpected </message>".to_string())
                })?;
                let source = builder.source.ok_or_else(|| {
                    LinguistError::ParseError(format!(
                        "message without <source> in context '{}'",
                        self.context_label()
                    ))
                })?;
                self.messages.push(Message {
                    locations: builder.locations,
                    source,
                    comment: builder.comment,
                    extracomment: builder.extracomment,
                    numerus: builder.numerus,
                    translation: builder
                        .translation
                        .unwrap_or_else(|| Translation::unfinished("")),
                });
            }
            "context" => {
                let name = self.context_name.take().ok_or_else(|| {
                    LinguistError::ParseError("context without <name>".to_string())
                })?;
                self.contexts.push(TsContext {
                    name,
                    messages: std::mem::take(&mut self.messages),
                });
            }
            _ => {}
        }
        Ok(())
    }

    fn finish_translation(&mut self) -> LinguistResult<()> {
        let Some(message) = self.message.as_mut() else {
            return Err(LinguistError::ParseError(
                "unexpected </translation>".to_string(),
            ));
        };
        let forms = std::mem::take(&mut self.forms);
        let text = std::mem::take(&mut self.trans_buf);

        let body = if forms.is_empty() {
            if message.numerus {
                if text.trim().is_empty() {
                    // An untranslated numerus entry has no forms yet.
                    TranslationBody::Plural(Vec::new())
                } else {
                    return Err(LinguistError::ParseError(format!(
                        "numerus message '{}' carries plain text instead of numerusforms",
                        message.source.as_deref().unwrap_or("<no source>")
                    )));
                }
            } else {
                TranslationBody::Text(text)
            }
        } else {
            if !message.numerus {
                return Err(LinguistError::ParseError(format!(
                    "message '{}' carries numerusforms but is not marked numerus",
                    message.source.as_deref().unwrap_or("<no source>")
                )));
            }
            if !text.trim().is_empty() {
                return Err(LinguistError::ParseError(format!(
                    "numerus message '{}' mixes plain text with numerusforms",
                    message.source.as_deref().unwrap_or("<no source>")
                )));
            }
            TranslationBody::Plural(forms)
        };

        message.translation = Some(Translation {
            status: self.status,
            body,
        });
        Ok(())
    }
}

/// Resolves a general entity reference name to its replacement text.
///
/// Handles the five predefined XML entities plus decimal and hexadecimal
/// character references.
fn resolve_entity(name: &str) -> Option<String> {
    match name {
        "amp" => Some("&".to_string()),
        "lt" => Some("<".to_string()),
        "gt" => Some(">".to_string()),
        "apos" => Some("'".to_string()),
        "quot" => Some("\"".to_string()),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok()
            } else {
                None
            };
            code.and_then(char::from_u32).map(String::from)
        }
    }
}
