//! Configuration management for codeswitch.
//!
//! Parses `codeswitch.toml` with serde and provides auto-discovery of the
//! config file in parent directories. CLI settings can be applied during
//! load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `build.source_dir` and `build.pattern` support `${VAR}` and
//! `${VAR:-default}`.

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use codeswitch_multilang::DefaultActivation;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the directory scanned for HTML files.
    pub source_dir: Option<PathBuf>,
    /// Override the glob pattern used inside the source directory.
    pub pattern: Option<String>,
    /// Override the default activation policy.
    pub default_activation: Option<DefaultActivation>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "codeswitch.toml";

const DEFAULT_SOURCE_DIR: &str = "site";
const DEFAULT_PATTERN: &str = "**/*.html";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Switcher configuration.
    pub multilang: MultiLangConfig,
    /// Build input configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Switcher configuration (`[multilang]`).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MultiLangConfig {
    /// Attribute marking a group element.
    pub marker_attribute: String,
    /// Attribute holding the group title.
    pub title_attribute: String,
    /// Attribute carrying an explicit language key. Empty disables it.
    pub language_attribute: String,
    /// Class added by the syntax highlighter.
    pub highlight_marker: String,
    /// Default activation policy.
    pub default: DefaultActivation,
    /// Button labels by language key.
    pub labels: HashMap<String, String>,
}

impl Default for MultiLangConfig {
    fn default() -> Self {
        Self {
            marker_attribute: "data-multilang".to_owned(),
            title_attribute: "title".to_owned(),
            language_attribute: "data-lang".to_owned(),
            highlight_marker: "hljs".to_owned(),
            default: DefaultActivation::default(),
            labels: HashMap::new(),
        }
    }
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    source_dir: Option<String>,
    pattern: Option<String>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory scanned for HTML files.
    pub source_dir: PathBuf,
    /// Glob pattern relative to `source_dir`.
    pub pattern: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`build.source_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} is not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a name usable as an HTML attribute or class token.
fn require_token(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain whitespace"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `codeswitch.toml` in the current directory and its parents, falling
    /// back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.build_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(pattern) = &settings.pattern {
            self.build_resolved.pattern.clone_from(pattern);
        }
        if let Some(default) = settings.default_activation {
            self.multilang.default = default;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            multilang: MultiLangConfig::default(),
            build: BuildConfigRaw::default(),
            build_resolved: BuildConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                pattern: DEFAULT_PATTERN.to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_multilang()?;
        require_non_empty(&self.build_resolved.pattern, "build.pattern")?;
        Ok(())
    }

    fn validate_multilang(&self) -> Result<(), ConfigError> {
        let m = &self.multilang;
        for (value, field) in [
            (&m.marker_attribute, "multilang.marker_attribute"),
            (&m.title_attribute, "multilang.title_attribute"),
            (&m.highlight_marker, "multilang.highlight_marker"),
        ] {
            require_non_empty(value, field)?;
            require_token(value, field)?;
        }
        require_token(&m.language_attribute, "multilang.language_attribute")?;

        for (key, label) in &m.labels {
            if key.is_empty() {
                return Err(ConfigError::Validation(
                    "multilang.labels keys cannot be empty".to_owned(),
                ));
            }
            require_non_empty(label, &format!("multilang.labels.{key}"))?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.build.source_dir {
            self.build.source_dir = Some(expand::expand_env(dir, "build.source_dir")?);
        }
        if let Some(ref pattern) = self.build.pattern {
            self.build.pattern = Some(expand::expand_env(pattern, "build.pattern")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = self.build.source_dir.as_deref().unwrap_or(DEFAULT_SOURCE_DIR);
        self.build_resolved = BuildConfig {
            source_dir: config_dir.join(source_dir),
            pattern: self
                .build
                .pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_PATTERN.to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.multilang.marker_attribute, "data-multilang");
        assert_eq!(config.multilang.title_attribute, "title");
        assert_eq!(config.multilang.language_attribute, "data-lang");
        assert_eq!(config.multilang.highlight_marker, "hljs");
        assert_eq!(config.multilang.default, DefaultActivation::FirstVariant);
        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/test/site"));
        assert_eq!(config.build_resolved.pattern, "**/*.html");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.multilang.marker_attribute, "data-multilang");
        assert!(config.multilang.labels.is_empty());
    }

    #[test]
    fn test_parse_multilang_config() {
        let toml = r#"
[multilang]
marker_attribute = "data-code-group"
highlight_marker = "highlighted"
default = "first-key"

[multilang.labels]
cpp = "C++"
csharp = "C#"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.multilang.marker_attribute, "data-code-group");
        assert_eq!(config.multilang.title_attribute, "title");
        assert_eq!(config.multilang.highlight_marker, "highlighted");
        assert_eq!(config.multilang.default, DefaultActivation::FirstKey);
        assert_eq!(config.multilang.labels.get("cpp").map(String::as_str), Some("C++"));
        assert_eq!(config.multilang.labels.len(), 2);
    }

    #[test]
    fn test_parse_unknown_default_fails() {
        let toml = r#"
[multilang]
default = "last"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[build]
source_dir = "public"
pattern = "docs/**/*.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.build_resolved.source_dir,
            PathBuf::from("/project/public")
        );
        assert_eq!(config.build_resolved.pattern, "docs/**/*.html");
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/project/site"));
        assert_eq!(config.build_resolved.pattern, "**/*.html");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/out")),
            default_activation: Some(DefaultActivation::FirstKey),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/custom/out"));
        assert_eq!(config.build_resolved.pattern, "**/*.html"); // Unchanged
        assert_eq!(config.multilang.default, DefaultActivation::FirstKey);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/test/site"));
        assert_eq!(config.multilang.default, DefaultActivation::FirstVariant);
    }

    #[test]
    fn test_expand_env_vars_source_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CODESWITCH_CONFIG_TEST_DIR", "generated");
        }

        let toml = r#"
[build]
source_dir = "${CODESWITCH_CONFIG_TEST_DIR}/html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/p"));

        assert_eq!(
            config.build_resolved.source_dir,
            PathBuf::from("/p/generated/html")
        );

        unsafe {
            std::env::remove_var("CODESWITCH_CONFIG_TEST_DIR");
        }
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err =
            Config::load(Some(Path::new("/nonexistent/codeswitch.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[build]\nsource_dir = \"out\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.build_resolved.source_dir, dir.path().join("out"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[multilang]\nmarker_attribute = \"\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("marker_attribute"));
    }

    #[test]
    fn test_load_validates_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            pattern: Some(String::new()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("build.pattern"));
    }

    #[test]
    fn test_discover_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    // Validation tests

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_highlight_marker_with_space() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.multilang.highlight_marker = "hl js".to_owned();
        assert_validation_error(&config, &["highlight_marker", "whitespace"]);
    }

    #[test]
    fn test_validate_empty_language_attribute_allowed() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.multilang.language_attribute = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_label() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config
            .multilang
            .labels
            .insert("cpp".to_owned(), String::new());
        assert_validation_error(&config, &["multilang.labels.cpp", "empty"]);
    }

    #[test]
    fn test_validate_empty_pattern() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.build_resolved.pattern = String::new();
        assert_validation_error(&config, &["build.pattern"]);
    }
}
