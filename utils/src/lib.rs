pub mod constants;
pub mod logging;
mod macros;

#[cfg(any(test, feature = "test"))]
pub mod test_utils;

use log::{trace, warn};
use miette::{Result, miette};

/// Retrieves an environment variable.
///
/// # Errors
/// Will error if the variable is not set or isn't valid unicode.
pub fn get_env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|e| miette!("Failed to retrieve env var '{key}': {e}"))
}

/// Interprets a "boolish" string value as accepted in
/// environment variables and flags.
///
/// Accepts `1`, `true`, `yes`, `on` as `true` and `0`, `false`,
/// `no`, `off` or an empty value as `false`, ignoring case and
/// surrounding whitespace. Any other value logs a warning and is
/// treated as `false`.
#[must_use]
pub fn parse_boolish(key: &str, value: &str) -> bool {
    trace!("parse_boolish({key}, {value})");

    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "" | "0" | "false" | "no" | "off" => false,
        other => {
            warn!("Unrecognized value '{other}' for {key}, treating it as false");
            false
        }
    }
}
