//! The `query` management command.
//!
//! Resolves a single translation the way the runtime would: parse the
//! catalogue, compile it, look up the context/source (and optional
//! disambiguating comment), and print the resolved text. With `-n` the
//! lookup goes through plural selection with the count substituted.

use linguist_rs_core::catalog::substitute_count;
use linguist_rs_core::{LinguistError, Settings};
use linguist_rs_ts::reader::parse_file;

use crate::command::ManagementCommand;

/// Resolves one translation from a TS catalogue.
pub struct QueryCommand;

/// The outcome of a lookup: the text shown to the user, and whether it came
/// from the catalogue or fell back to the source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub text: String,
    pub translated: bool,
}

/// Performs the lookup against an already-parsed catalogue.
pub fn resolve(
    catalog: &linguist_rs_core::Catalog,
    context: &str,
    source: &str,
    comment: Option<&str>,
    count: Option<u64>,
) -> QueryResult {
    match count {
        Some(n) => match catalog.translate_plural_with_comment(context, source, comment, n) {
            Some(text) => QueryResult {
                text,
                translated: true,
            },
            None => QueryResult {
                text: substitute_count(source, n),
                translated: false,
            },
        },
        None => match catalog.translate_with_comment(context, source, comment) {
            Some(text) => QueryResult {
                text: text.to_string(),
                translated: true,
            },
            None => QueryResult {
                text: source.to_string(),
                translated: false,
            },
        },
    }
}

impl ManagementCommand for QueryCommand {
    fn name(&self) -> &'static str {
        "query"
    }

    fn help(&self) -> &'static str {
        "Resolve one translation from a TS catalogue"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("path")
                .help("Catalogue file to query")
                .required(true),
        )
        .arg(
            clap::Arg::new("context")
                .long("context")
                .short('c')
                .required(true)
                .help("Context name"),
        )
        .arg(
            clap::Arg::new("source")
                .long("source")
                .short('s')
                .required(true)
                .help("Source text to look up"),
        )
        .arg(
            clap::Arg::new("comment")
                .long("comment")
                .help("Disambiguating comment"),
        )
        .arg(
            clap::Arg::new("count")
                .long("count")
                .short('n')
                .value_parser(clap::value_parser!(u64))
                .help("Count for plural selection"),
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
        let context = matches
            .get_one::<String>("context")
            .ok_or_else(|| LinguistError::ConfigurationError("missing context".to_string()))?;
        let source = matches
            .get_one::<String>("source")
            .ok_or_else(|| LinguistError::ConfigurationError("missing source".to_string()))?;
        let comment = matches.get_one::<String>("comment").map(String::as_str);
        let count = matches.get_one::<u64>("count").copied();

        let catalog = parse_file(path)?.to_catalog();
        let result = resolve(&catalog, context, source, comment, count);

        println!("{}", result.text);
        if result.translated {
            tracing::debug!(context, source, "resolved from catalogue");
        } else {
            tracing::warn!(context, source, "no finished translation, using source text");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguist_rs_core::catalog::{Catalog, CatalogEntry};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new("ru");
        catalog.insert("ChatPage", "Logout", None, CatalogEntry::text("Выйти"));
        catalog.insert(
            "ChatPage",
            "Join",
            Some("room"),
            CatalogEntry::text("Войти в комнату"),
        );
        catalog.insert(
            "ChatPage",
            "Reply",
            None,
            CatalogEntry::text("").unfinished(),
        );
        catalog.insert(
            "RoomInfo",
            "%n member(s)",
            None,
            CatalogEntry::plural(vec![
                "%n участник".into(),
                "%n участника".into(),
                "%n участников".into(),
            ]),
        );
        catalog
    }

    #[test]
    fn test_resolve_plain() {
        let result = resolve(&catalog(), "ChatPage", "Logout", None, None);
        assert_eq!(result.text, "Выйти");
        assert!(result.translated);
    }

    #[test]
    fn test_resolve_with_comment() {
        let result = resolve(&catalog(), "ChatPage", "Join", Some("room"), None);
        assert_eq!(result.text, "Войти в комнату");
        assert!(result.translated);
    }

    #[test]
    fn test_resolve_unfinished_falls_back() {
        let result = resolve(&catalog(), "ChatPage", "Reply", None, None);
        assert_eq!(result.text, "Reply");
        assert!(!result.translated);
    }

    #[test]
    fn test_resolve_plural() {
        let result = resolve(&catalog(), "RoomInfo", "%n member(s)", None, Some(5));
        assert_eq!(result.text, "5 участников");
        assert!(result.translated);
    }

    #[test]
    fn test_resolve_plural_missing_falls_back_with_count() {
        let result = resolve(&catalog(), "RoomInfo", "%n file(s)", None, Some(2));
        assert_eq!(result.text, "2 file(s)");
        assert!(!result.translated);
    }
}
