//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Returns the value unchanged when it holds no `${` reference, so a bare
/// `$` in a literal host or path is never touched.
///
/// # Errors
///
/// Returns `ConfigError::EnvVar` naming `field` if a reference without a
/// default points at an unset or non-UTF-8 variable.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })
}

/// Lookup failure carried through `shellexpand`.
struct LookupError {
    var_name: String,
}
