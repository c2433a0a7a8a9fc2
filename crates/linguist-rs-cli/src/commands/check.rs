//! The `check` management command.
//!
//! Parses one or more TS catalogues and runs the consistency checks over
//! each, reporting findings and failing with a data error when any check
//! reports an error.

use linguist_rs_core::{LinguistError, Settings};
use linguist_rs_ts::check::{check_document, CheckLevel, CheckMessage};
use linguist_rs_ts::reader::parse_file;

use crate::command::ManagementCommand;

/// Validates TS catalogues against the consistency checks.
pub struct CheckCommand;

/// Runs the checks over every given catalogue path.
///
/// Returns all findings, prefixing each with its file for multi-file runs.
pub fn run_checks(
    paths: &[String],
    strict_placeholders: bool,
) -> Result<Vec<(String, CheckMessage)>, LinguistError> {
    let mut findings = Vec::new();
    for path in paths {
        let doc = parse_file(path)?;
        for finding in check_document(&doc, strict_placeholders) {
            findings.push((path.clone(), finding));
        }
    }
    Ok(findings)
}

impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Run consistency checks over TS catalogues"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("paths")
                .help("Catalogue files to check")
                .num_args(1..)
                .required(true),
        )
        .arg(
            clap::Arg::new("strict")
                .long("strict")
                .action(clap::ArgAction::SetTrue)
                .help("Treat placeholder findings as errors"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), LinguistError> {
        let paths: Vec<String> = matches
            .get_many::<String>("paths")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        let strict = matches.get_flag("strict") || settings.strict_placeholders;

        let findings = run_checks(&paths, strict)?;

        if findings.is_empty() {
            tracing::info!("Catalogue check identified no issues");
            return Ok(());
        }

        let errors = findings
            .iter()
            .filter(|(_, f)| f.level == CheckLevel::Error)
            .count();
        let warnings = findings
            .iter()
            .filter(|(_, f)| f.level == CheckLevel::Warning)
            .count();

        for (path, finding) in &findings {
            match finding.level {
                CheckLevel::Error => tracing::error!("{path}: {finding}"),
                CheckLevel::Warning => tracing::warn!("{path}: {finding}"),
                CheckLevel::Info => tracing::info!("{path}: {finding}"),
            }
        }

        tracing::info!(
            "Catalogue check identified {} finding(s) ({} error(s), {} warning(s))",
            findings.len(),
            errors,
            warnings
        );

        if errors > 0 {
            return Err(LinguistError::ValidationError(format!(
                "catalogue check found {errors} error(s)"
            )));
        }

        Ok(())
    }
}
