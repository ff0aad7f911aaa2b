//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Values without any `${` are returned untouched, so glob patterns and
/// paths with a literal `$` need no escaping.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |var: &str| {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    };
    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} is not set", e.cause.0),
        })
}

struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CODESWITCH_TEST_SITE", "public");
        }
        let result = expand_env("${CODESWITCH_TEST_SITE}/html", "build.source_dir").unwrap();
        assert_eq!(result, "public/html");
        unsafe {
            std::env::remove_var("CODESWITCH_TEST_SITE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CODESWITCH_TEST_UNSET");
        }
        let result = expand_env("${CODESWITCH_TEST_UNSET:-site}", "build.source_dir").unwrap();
        assert_eq!(result, "site");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CODESWITCH_TEST_MISSING");
        }
        let err = expand_env("${CODESWITCH_TEST_MISSING}", "build.pattern").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CODESWITCH_TEST_MISSING"));
        assert!(err.to_string().contains("build.pattern"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("out/$draft/**/*.html", "build.pattern").unwrap();
        assert_eq!(result, "out/$draft/**/*.html");
    }
}
