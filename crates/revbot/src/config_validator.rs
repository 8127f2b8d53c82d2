//! Validation utilities.

use std::fmt::Write;

use revbot_config::{Config, DatabaseDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        write!(error, "  - Missing env. var.: {}", name).unwrap();
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "REVBOT_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "REVBOT_SERVER_BIND_PORT");
    }

    // Check PG configuration
    if config.database.driver == DatabaseDriver::Postgres && config.database.pg.url.is_empty() {
        _missing(&mut error, "REVBOT_DATABASE_PG_URL");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reports_every_problem() {
        let mut config = Config::from_env_no_version().unwrap();
        config.server.bind_ip = String::new();
        config.server.bind_port = 0;
        config.database.driver = DatabaseDriver::Postgres;
        config.database.pg.url = String::new();

        let err = validate_configuration(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Errors on environment variables:\n\n  - Missing env. var.: REVBOT_SERVER_BIND_IP\n  - Missing env. var.: REVBOT_SERVER_BIND_PORT\n  - Missing env. var.: REVBOT_DATABASE_PG_URL"
        );
    }

    #[test]
    fn memory_driver_needs_no_url() {
        let mut config = Config::from_env_no_version().unwrap();
        config.server.bind_ip = "0.0.0.0".into();
        config.server.bind_port = 8080;
        config.database.driver = DatabaseDriver::Memory;
        config.database.pg.url = String::new();

        assert!(validate_configuration(&config).is_ok());
    }
}
