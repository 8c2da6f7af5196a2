use std::str::FromStr;

use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// An environment variable is set but its value cannot be used.
#[derive(Debug, Error)]
#[error("Invalid value {value:?} for environment variable {name}: {reason}")]
pub struct InvalidEnvVarError {
    pub name: String,
    pub value: String,
    pub reason: String,
}

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Reads an optional override. Unset and blank values both read as `None`.
pub fn get_env_var_opt(name: &str) -> Option<String> {
    get_env_var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses an optional override, e.g. a numeric timeout.
///
/// Returns `Ok(None)` when the variable is unset or blank.
pub fn parse_env_var_opt<T>(name: &str) -> Result<Option<T>, InvalidEnvVarError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_var_opt(name) {
        None => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|e| InvalidEnvVarError {
            name: name.to_string(),
            reason: e.to_string(),
            value,
        }),
    }
}
