//! `codeswitch apply` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use codeswitch_html::MultiLangProcessor;

use super::{InputArgs, multilang_options};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the apply command.
#[derive(Args)]
pub(crate) struct ApplyArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the result here instead of rewriting the input (single file only).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail on the first file that cannot be parsed.
    #[arg(long)]
    strict: bool,
}

/// Totals over all processed files.
#[derive(Debug, Default, PartialEq, Eq)]
struct ApplySummary {
    files: usize,
    written: usize,
    groups: usize,
    skipped_groups: usize,
    failed: usize,
}

impl ApplyArgs {
    /// Execute the apply command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, files) = self.input.resolve()?;

        if self.output.is_some() && files.len() != 1 {
            return Err(CliError::Validation(format!(
                "--output requires exactly one input file, got {}",
                files.len()
            )));
        }

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        let mut processor = MultiLangProcessor::new(multilang_options(&config.multilang));
        let summary = apply_files(
            &mut processor,
            &files,
            self.output.as_deref(),
            self.strict,
            &output,
        )?;

        output.success(&format!(
            "Processed {} files: {} groups initialized, {} already initialized, {} files written",
            summary.files, summary.groups, summary.skipped_groups, summary.written
        ));
        if summary.failed > 0 {
            output.warning(&format!("{} files could not be parsed", summary.failed));
        }
        Ok(())
    }
}

fn apply_files(
    processor: &mut MultiLangProcessor,
    files: &[PathBuf],
    target: Option<&Path>,
    strict: bool,
    output: &Output,
) -> Result<ApplySummary, CliError> {
    let mut summary = ApplySummary::default();

    for file in files {
        let html = std::fs::read_to_string(file)?;
        summary.files += 1;

        let outcome = match processor.process(&html) {
            Ok(outcome) => outcome,
            Err(source) if strict => {
                return Err(CliError::Parse {
                    path: file.clone(),
                    source,
                });
            }
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "Skipping unparsable file");
                output.page_warning(file, &format!("skipped: {e}"));
                summary.failed += 1;
                continue;
            }
        };

        for warning in processor.take_warnings() {
            output.page_warning(file, &warning);
        }

        summary.groups += outcome.groups;
        summary.skipped_groups += outcome.skipped;

        let destination = target.unwrap_or(file);
        if outcome.changed() || target.is_some() {
            std::fs::write(destination, &outcome.html)?;
            summary.written += 1;
            tracing::info!(
                path = %destination.display(),
                groups = outcome.groups,
                "Wrote file"
            );
        }
    }

    Ok(summary)
}
