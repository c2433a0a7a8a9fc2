//! Catalogue consistency checks.
//!
//! Runs a set of diagnostics over a parsed [`TsDocument`] and returns a list
//! of findings, each tagged with a stable check id, a severity, and enough
//! position information (context name, source text) to locate the offending
//! message. Severities follow the usual compiler convention: errors make the
//! catalogue unusable at runtime, warnings flag entries a translator should
//! revisit, infos are informational tallies.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use linguist_rs_core::catalog::TranslationBody;
use linguist_rs_core::plural::PluralRule;

use crate::document::{Message, TranslationStatus, TsDocument};

/// Severity of a check finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One finding produced by [`check_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMessage {
    /// Stable identifier, e.g. `numerus.E001`.
    pub id: &'static str,
    pub level: CheckLevel,
    /// Context the finding belongs to, if any.
    pub context: Option<String>,
    /// Source text of the offending message, if any.
    pub source: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl CheckMessage {
    fn document(id: &'static str, level: CheckLevel, message: impl Into<String>) -> Self {
        Self {
            id,
            level,
            context: None,
            source: None,
            message: message.into(),
        }
    }

    fn entry(
        id: &'static str,
        level: CheckLevel,
        context: &str,
        source: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            level,
            context: Some(context.to_string()),
            source: Some(source.to_string()),
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.level, self.id)?;
        if let Some(context) = &self.context {
            write!(f, " {context}")?;
            if let Some(source) = &self.source {
                write!(f, ": \"{source}\"")?;
            }
        }
        write!(f, ": {}", self.message)
    }
}

/// Runs every check against the document.
///
/// `strict_placeholders` upgrades placeholder findings from warnings to
/// errors; translators working against CI gates enable it via settings.
pub fn check_document(doc: &TsDocument, strict_placeholders: bool) -> Vec<CheckMessage> {
    let rule = PluralRule::for_language(&doc.language);
    let placeholder_level = if strict_placeholders {
        CheckLevel::Error
    } else {
        CheckLevel::Warning
    };

    let mut findings = Vec::new();
    let mut unfinished = 0usize;

    for context in &doc.contexts {
        let mut seen: HashMap<(&str, Option<&str>), usize> = HashMap::new();

        for message in &context.messages {
            if message.translation.status == TranslationStatus::Unfinished {
                unfinished += 1;
            }

            // Vanished and obsolete entries are historical; they are never
            // loaded, so findings against them would only be noise.
            if matches!(
                message.translation.status,
                TranslationStatus::Vanished | TranslationStatus::Obsolete
            ) {
                continue;
            }

            *seen
                .entry((message.source.as_str(), message.comment.as_deref()))
                .or_insert(0) += 1;

            check_numerus(rule, &context.name, message, &mut findings);
            check_content(&context.name, message, &mut findings);
            check_placeholders(placeholder_level, &context.name, message, &mut findings);
        }

        for ((source, comment), count) in seen {
            if count > 1 {
                let detail = match comment {
                    Some(comment) => format!(
                        "{count} messages share source and comment \"{comment}\"; translations shadow each other"
                    ),
                    None => format!(
                        "{count} messages share this source with no disambiguating comment; translations shadow each other"
                    ),
                };
                findings.push(CheckMessage::entry(
                    "content.W002",
                    CheckLevel::Warning,
                    &context.name,
                    source,
                    detail,
                ));
            }
        }
    }

    if unfinished > 0 {
        findings.push(CheckMessage::document(
            "status.I001",
            CheckLevel::Info,
            format!(
                "{unfinished} of {} messages are unfinished",
                doc.message_count()
            ),
        ));
    }

    findings
}

/// Returns true when any finding is an error.
pub fn has_errors(findings: &[CheckMessage]) -> bool {
    findings.iter().any(|f| f.level == CheckLevel::Error)
}

fn check_numerus(
    rule: PluralRule,
    context: &str,
    message: &Message,
    findings: &mut Vec<CheckMessage>,
) {
    let TranslationBody::Plural(forms) = &message.translation.body else {
        return;
    };
    let expected = rule.form_count();
    if forms.len() == expected {
        return;
    }
    // Empty unfinished plurals are the normal state of a fresh lupdate run.
    if message.translation.status == TranslationStatus::Unfinished && forms.is_empty() {
        return;
    }
    let level = if message.translation.status == TranslationStatus::Finished {
        CheckLevel::Error
    } else {
        CheckLevel::Warning
    };
    findings.push(CheckMessage::entry(
        "numerus.E001",
        level,
        context,
        &message.source,
        format!(
            "expected {expected} numerusforms for this language, found {}",
            forms.len()
        ),
    ));
}

fn check_content(context: &str, message: &Message, findings: &mut Vec<CheckMessage>) {
    if message.translation.status != TranslationStatus::Finished {
        return;
    }
    let empty = match &message.translation.body {
        TranslationBody::Text(text) => text.is_empty(),
        TranslationBody::Plural(forms) => forms.iter().any(String::is_empty),
    };
    if empty {
        findings.push(CheckMessage::entry(
            "content.W001",
            CheckLevel::Warning,
            context,
            &message.source,
            "marked finished but the translation is empty",
        ));
    }
}

static POSITIONAL_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%([1-9])").expect("placeholder pattern is valid"));

fn positional_placeholders(text: &str) -> Vec<u8> {
    let mut indices: Vec<u8> = POSITIONAL_PLACEHOLDER
        .captures_iter(text)
        .map(|c| c[1].as_bytes()[0] - b'0')
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

fn check_placeholders(
    level: CheckLevel,
    context: &str,
    message: &Message,
    findings: &mut Vec<CheckMessage>,
) {
    if message.translation.status != TranslationStatus::Finished {
        return;
    }
    let expected = positional_placeholders(&message.source);

    match &message.translation.body {
        TranslationBody::Text(text) => {
            if text.is_empty() {
                return;
            }
            if positional_placeholders(text) != expected {
                findings.push(CheckMessage::entry(
                    "placeholder.W001",
                    level,
                    context,
                    &message.source,
                    format!("translation placeholders do not match source ({expected:?})"),
                ));
            }
            if !message.numerus && text.contains("%n") && !message.source.contains("%n") {
                findings.push(CheckMessage::entry(
                    "placeholder.W002",
                    level,
                    context,
                    &message.source,
                    "translation uses %n but the message is not plural",
                ));
            }
        }
        TranslationBody::Plural(forms) => {
            for (index, form) in forms.iter().enumerate() {
                if form.is_empty() {
                    continue;
                }
                if positional_placeholders(form) != expected {
                    findings.push(CheckMessage::entry(
                        "placeholder.W001",
                        level,
                        context,
                        &message.source,
                        format!(
                            "numerusform {index} placeholders do not match source ({expected:?})"
                        ),
                    ));
                }
            }
            // At least one form must carry the count; a plural message whose
            // every form drops %n cannot show the number anywhere.
            if message.source.contains("%n")
                && !forms.is_empty()
                && forms.iter().all(|form| !form.contains("%n"))
            {
                findings.push(CheckMessage::entry(
                    "placeholder.W002",
                    level,
                    context,
                    &message.source,
                    "no numerusform carries %n although the source does",
                ));
            }
        }
    }
}
