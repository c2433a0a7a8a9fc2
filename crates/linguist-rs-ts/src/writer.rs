//! TS XML writing.
//!
//! Serializes a [`TsDocument`] back into the TS format with Qt Linguist's
//! 4-space indentation. The contract is semantic round-tripping: writing a
//! document and reading it back yields an equal document, preserving every
//! context/source/translation tuple, status flag, comment, and numerusform.

use std::fmt::Display;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use linguist_rs_core::catalog::TranslationBody;
use linguist_rs_core::error::{LinguistError, LinguistResult};

use crate::document::{Message, TsContext, TsDocument};

fn xml_err(e: impl Display) -> LinguistError {
    LinguistError::XmlError(e.to_string())
}

/// Serializes a document to a TS XML string.
pub fn write_str(doc: &TsDocument) -> LinguistResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::DocType(BytesText::new("TS")))
        .map_err(xml_err)?;

    let mut ts = BytesStart::new("TS");
    ts.push_attribute(("version", doc.version.as_str()));
    ts.push_attribute(("language", doc.language.as_str()));
    if let Some(source_language) = &doc.source_language {
        ts.push_attribute(("sourcelanguage", source_language.as_str()));
    }
    writer.write_event(Event::Start(ts)).map_err(xml_err)?;

    for context in &doc.contexts {
        write_context(&mut writer, context)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("TS")))
        .map_err(xml_err)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| LinguistError::SerializationError(e.to_string()))
}

/// Serializes a document to a TS XML file.
pub fn write_file(doc: &TsDocument, path: impl AsRef<Path>) -> LinguistResult<()> {
    let content = write_str(doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn write_context(writer: &mut Writer<Vec<u8>>, context: &TsContext) -> LinguistResult<()> {
    writer
        .write_event(Event::Start(BytesStart::new("context")))
        .map_err(xml_err)?;

    write_text_element(writer, "name", &context.name)?;
    for message in &context.messages {
        write_message(writer, message)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("context")))
        .map_err(xml_err)?;
    Ok(())
}

fn write_message(writer: &mut Writer<Vec<u8>>, message: &Message) -> LinguistResult<()> {
    let mut start = BytesStart::new("message");
    if message.numerus {
        start.push_attribute(("numerus", "yes"));
    }
    writer.write_event(Event::Start(start)).map_err(xml_err)?;

    for location in &message.locations {
        let mut element = BytesStart::new("location");
        if let Some(filename) = &location.filename {
            element.push_attribute(("filename", filename.as_str()));
        }
        if let Some(line) = &location.line {
            element.push_attribute(("line", line.encode().as_str()));
        }
        writer.write_event(Event::Empty(element)).map_err(xml_err)?;
    }

    write_text_element(writer, "source", &message.source)?;
    if let Some(comment) = &message.comment {
        write_text_element(writer, "comment", comment)?;
    }
    if let Some(extracomment) = &message.extracomment {
        write_text_element(writer, "extracomment", extracomment)?;
    }

    let mut translation = BytesStart::new("translation");
    if let Some(status) = message.translation.status.attribute() {
        translation.push_attribute(("type", status));
    }
    writer
        .write_event(Event::Start(translation))
        .map_err(xml_err)?;
    match &message.translation.body {
        TranslationBody::Text(text) => {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_err)?;
        }
        TranslationBody::Plural(forms) => {
            for form in forms {
                write_text_element(writer, "numerusform", form)?;
            }
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new("translation")))
        .map_err(xml_err)?;

    writer
        .write_event(Event::End(BytesEnd::new("message")))
        .map_err(xml_err)?;
    Ok(())
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> LinguistResult<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{
        LineRef, Location, Message, Translation, TranslationStatus, TsContext,
    };
    use crate::reader::parse_str;

    fn sample_document() -> TsDocument {
        let mut doc = TsDocument::new("ru");
        doc.source_language = Some("en".to_string());

        let mut call_bar = TsContext::new("ActiveCallBar");
        let mut calling = Message::new("Calling...", Translation::finished("Вызов…"));
        calling.locations.push(Location {
            filename: Some("../qml/voip/ActiveCallBar.qml".to_string()),
            line: Some(LineRef::Relative(103)),
        });
        call_bar.messages.push(calling);
        call_bar
            .messages
            .push(Message::new("Connecting...", Translation::unfinished("")));

        let mut room_info = TsContext::new("RoomInfo");
        let mut members = Message::new(
            "%n member(s)",
            Translation::plural(vec![
                "%n участник".to_string(),
                "%n участника".to_string(),
                "%n участников".to_string(),
            ]),
        );
        members.locations.push(Location {
            filename: None,
            line: Some(LineRef::Relative(66)),
        });
        room_info.messages.push(members);
        let mut encryption = Message::new("Encryption", Translation::finished("Шифрование"));
        encryption.comment = Some("Room settings toggle".to_string());
        room_info.messages.push(encryption);

        doc.contexts.push(call_bar);
        doc.contexts.push(room_info);
        doc
    }

    #[test]
    fn test_write_emits_header() {
        let output = write_str(&sample_document()).unwrap();
        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(output.contains("<!DOCTYPE TS>"));
        assert!(output.contains("<TS version=\"2.1\" language=\"ru\" sourcelanguage=\"en\">"));
        assert!(output.ends_with("</TS>\n"));
    }

    #[test]
    fn test_write_marks_unfinished_and_numerus() {
        let output = write_str(&sample_document()).unwrap();
        assert!(output.contains("<translation type=\"unfinished\">"));
        assert!(output.contains("<message numerus=\"yes\">"));
        assert!(output.contains("<numerusform>%n участников</numerusform>"));
        assert!(output.contains("<location filename=\"../qml/voip/ActiveCallBar.qml\" line=\"+103\"/>"));
    }

    #[test]
    fn test_roundtrip_preserves_document() {
        let doc = sample_document();
        let output = write_str(&doc).unwrap();
        let reparsed = parse_str(&output).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_roundtrip_escapes_entities() {
        let mut doc = TsDocument::new("ru");
        let mut context = TsContext::new("RoomList");
        context.messages.push(Message::new(
            "This room can't be joined & that's fine",
            Translation::finished("<нельзя>"),
        ));
        doc.contexts.push(context);

        let output = write_str(&doc).unwrap();
        assert!(!output.contains("<нельзя>"));
        let reparsed = parse_str(&output).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_roundtrip_vanished_status() {
        let mut doc = TsDocument::new("ru");
        let mut context = TsContext::new("C");
        context.messages.push(Message::new(
            "Old",
            Translation {
                status: TranslationStatus::Vanished,
                body: linguist_rs_core::catalog::TranslationBody::Text("Старое".to_string()),
            },
        ));
        doc.contexts.push(context);

        let reparsed = parse_str(&write_str(&doc).unwrap()).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_write_file_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_ru.ts");
        let doc = sample_document();
        write_file(&doc, &path).unwrap();
        let reparsed = crate::reader::parse_file(&path).unwrap();
        assert_eq!(doc, reparsed);
    }
}
