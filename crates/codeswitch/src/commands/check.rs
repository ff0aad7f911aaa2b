//! `codeswitch check` command implementation.

use std::path::PathBuf;

use clap::Args;
use codeswitch_html::MultiLangProcessor;

use super::{InputArgs, multilang_options};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if any file has defects or cannot be parsed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, files) = self.input.resolve()?;

        let mut processor = MultiLangProcessor::new(multilang_options(&config.multilang));
        let problems = check_files(&mut processor, &files, &output)?;

        if problems > 0 {
            return Err(CliError::Validation(format!(
                "{problems} problems found in {} files",
                files.len()
            )));
        }
        output.success(&format!("Checked {} files, no problems found", files.len()));
        Ok(())
    }
}

/// Report defects per file. Returns the number of problems found.
fn check_files(
    processor: &mut MultiLangProcessor,
    files: &[PathBuf],
    output: &Output,
) -> Result<usize, CliError> {
    let mut problems = 0;

    for file in files {
        let html = std::fs::read_to_string(file)?;
        let messages = match processor.process(&html) {
            Ok(_) => processor.take_warnings(),
            Err(e) => vec![format!("cannot be parsed: {e}")],
        };

        if !messages.is_empty() {
            output.page(file, &messages);
        }
        problems += messages.len();
    }

    Ok(problems)
}
