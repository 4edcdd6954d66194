//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` is the config path reported when a variable is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(
            expand_env("https://docs.example.com", "links.docs_root_url").unwrap(),
            "https://docs.example.com"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDCOOK_EXPAND_UNSET");
        }
        assert_eq!(
            expand_env("${MDCOOK_EXPAND_UNSET:-v13}", "links.api_version").unwrap(),
            "v13"
        );
    }

    #[test]
    fn test_missing_variable_reports_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDCOOK_EXPAND_MISSING");
        }
        let err = expand_env("${MDCOOK_EXPAND_MISSING}/api", "links.api_base_url").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("links.api_base_url"));
        assert!(msg.contains("${MDCOOK_EXPAND_MISSING} not set"));
    }
}
