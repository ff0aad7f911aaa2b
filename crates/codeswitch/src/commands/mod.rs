//! CLI command implementations.

mod apply;
mod check;

use std::path::PathBuf;

use clap::Args;
use codeswitch_config::{CliSettings, Config, MultiLangConfig};
use codeswitch_multilang::{DefaultActivation, MultiLangOptions};

use crate::error::CliError;

pub(crate) use apply::ApplyArgs;
pub(crate) use check::CheckArgs;

/// Input selection shared by all commands.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// HTML files to process (default: files matching the pattern in the source directory).
    files: Vec<PathBuf>,

    /// Directory scanned for HTML files (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Glob pattern relative to the source directory (overrides config).
    #[arg(long)]
    pattern: Option<String>,

    /// Default activation policy: first-variant or first-key (overrides config).
    #[arg(long, value_name = "POLICY")]
    default: Option<DefaultActivation>,

    /// Path to configuration file (default: auto-discover codeswitch.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl InputArgs {
    /// Load configuration and resolve the list of input files.
    pub(crate) fn resolve(&self) -> Result<(Config, Vec<PathBuf>), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            pattern: self.pattern.clone(),
            default_activation: self.default,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let files = if self.files.is_empty() {
            collect_files(&config)?
        } else {
            self.files.clone()
        };
        Ok((config, files))
    }
}

/// Find all files matching the configured pattern below the source directory.
fn collect_files(config: &Config) -> Result<Vec<PathBuf>, CliError> {
    let source_dir = &config.build_resolved.source_dir;
    if !source_dir.is_dir() {
        return Err(CliError::Validation(format!(
            "Source directory not found: {}",
            source_dir.display()
        )));
    }

    let pattern = source_dir.join(&config.build_resolved.pattern);
    let mut files = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Build switcher options from the `[multilang]` config section.
pub(crate) fn multilang_options(config: &MultiLangConfig) -> MultiLangOptions {
    MultiLangOptions {
        marker_attribute: config.marker_attribute.clone(),
        title_attribute: config.title_attribute.clone(),
        language_attribute: (!config.language_attribute.is_empty())
            .then(|| config.language_attribute.clone()),
        highlight_marker: config.highlight_marker.clone(),
        default_activation: config.default,
        labels: config.labels.clone(),
    }
}
