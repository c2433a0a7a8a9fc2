//! The `stats` management command.
//!
//! Summarizes the completion state of a TS catalogue: per-context and total
//! counts of finished, unfinished, vanished, and plural messages. Supports
//! plain-text output for humans and JSON for CI dashboards.

use linguist_rs_core::{LinguistError, Settings};
use linguist_rs_ts::document::{TranslationStatus, TsDocument};
use linguist_rs_ts::reader::parse_file;

use crate::command::ManagementCommand;

/// Reports completion statistics for a TS catalogue.
pub struct StatsCommand;

/// Message tallies for one context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextStats {
    pub total: usize,
    pub finished: usize,
    pub unfinished: usize,
    pub vanished: usize,
    pub numerus: usize,
}

impl ContextStats {
    fn add(&mut self, other: Self) {
        self.total += other.total;
        self.finished += other.finished;
        self.unfinished += other.unfinished;
        self.vanished += other.vanished;
        self.numerus += other.numerus;
    }
}

/// Computes per-context statistics, in document order, plus the totals row.
pub fn document_stats(doc: &TsDocument) -> (Vec<(String, ContextStats)>, ContextStats) {
    let mut contexts = Vec::new();
    let mut totals = ContextStats::default();

    for context in &doc.contexts {
        let mut stats = ContextStats::default();
        for message in &context.messages {
            stats.total += 1;
            match message.translation.status {
                TranslationStatus::Finished => stats.finished += 1,
                TranslationStatus::Unfinished => stats.unfinished += 1,
                TranslationStatus::Vanished | TranslationStatus::Obsolete => stats.vanished += 1,
            }
            if message.numerus {
                stats.numerus += 1;
            }
        }
        totals.add(stats);
        contexts.push((context.name.clone(), stats));
    }

    (contexts, totals)
}

fn stats_json(value: &ContextStats) -> serde_json::Value {
    serde_json::json!({
        "total": value.total,
        "finished": value.finished,
        "unfinished": value.unfinished,
        "vanished": value.vanished,
        "numerus": value.numerus,
    })
}

impl ManagementCommand for StatsCommand {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn help(&self) -> &'static str {
        "Report completion statistics for a TS catalogue"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("path")
                .help("Catalogue file to summarize")
                .required(true),
        )
        .arg(
            clap::Arg::new("format")
                .long("format")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        _settings: &Settings,
    ) -> Result<(), LinguistError> {
        let path = matches
            .get_one::<String>("path")
            .ok_or_else(|| LinguistError::ConfigurationError("missing path".to_string()))?;
        let format = matches
            .get_one::<String>("format")
            .map_or("text", String::as_str);

        let doc = parse_file(path)?;
        let (contexts, totals) = document_stats(&doc);

        if format == "json" {
            let output = serde_json::json!({
                "path": path,
                "language": doc.language,
                "contexts": contexts
                    .iter()
                    .map(|(name, stats)| {
                        let mut value = stats_json(stats);
                        value["name"] = serde_json::Value::String(name.clone());
                        value
                    })
                    .collect::<Vec<_>>(),
                "totals": stats_json(&totals),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| LinguistError::SerializationError(e.to_string()))?
            );
        } else {
            println!("{path} ({})", doc.language);
            for (name, stats) in &contexts {
                println!(
                    "  {name}: {} finished, {} unfinished, {} vanished, {} plural ({} total)",
                    stats.finished, stats.unfinished, stats.vanished, stats.numerus, stats.total
                );
            }
            println!(
                "  total: {} finished, {} unfinished, {} vanished, {} plural ({} messages)",
                totals.finished, totals.unfinished, totals.vanished, totals.numerus, totals.total
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguist_rs_ts::document::{Message, Translation, TsContext};

    fn sample() -> TsDocument {
        let mut doc = TsDocument::new("ru");
        let mut chat = TsContext::new("ChatPage");
        chat.messages
            .push(Message::new("Logout", Translation::finished("Выйти")));
        chat.messages
            .push(Message::new("Reply", Translation::unfinished("")));
        let mut info = TsContext::new("RoomInfo");
        info.messages.push(Message::new(
            "%n member(s)",
            Translation::plural(vec!["a".into(), "b".into(), "c".into()]),
        ));
        info.messages.push(Message::new(
            "Old",
            Translation {
                status: TranslationStatus::Vanished,
                body: linguist_rs_core::catalog::TranslationBody::Text("x".into()),
            },
        ));
        doc.contexts.push(chat);
        doc.contexts.push(info);
        doc
    }

    #[test]
    fn test_document_stats_tallies() {
        let (contexts, totals) = document_stats(&sample());
        assert_eq!(contexts.len(), 2);
        assert_eq!(
            contexts[0].1,
            ContextStats {
                total: 2,
                finished: 1,
                unfinished: 1,
                vanished: 0,
                numerus: 0
            }
        );
        assert_eq!(
            contexts[1].1,
            ContextStats {
                total: 2,
                finished: 1,
                unfinished: 0,
                vanished: 1,
                numerus: 1
            }
        );
        assert_eq!(totals.total, 4);
        assert_eq!(totals.finished, 2);
    }

    #[test]
    fn test_stats_json_shape() {
        let (_, totals) = document_stats(&sample());
        let value = stats_json(&totals);
        assert_eq!(value["total"], 4);
        assert_eq!(value["unfinished"], 1);
        assert_eq!(value["numerus"], 1);
    }
}
