use crate::error::DriverError;

pub mod database;
pub mod error;

/// Reads `key` from the environment (or `.env`), falling back to `default`
/// only when the variable is not set at all.
pub fn env_or(key: &str, default: &str) -> Result<String, DriverError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(value),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(default.to_string()),
        Err(error) => Err(DriverError::from(error)),
    }
}
