//! Configuration validation logic.

use crate::config::schema::RouterConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation error: {}", self.0)
    }
}

/// Validate a RouterConfig for semantic correctness.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // 1. The controller writes everything into partitions[0]; an empty list
    //    leaves it nowhere to put configuration.
    if config.bigip.partitions.is_empty() {
        errors.push(ValidationError(
            "bigip.partitions must contain at least one partition".to_string(),
        ));
    }

    // 2. Log level must be one the subscriber understands
    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ValidationError(format!(
            "logging.level '{}' is not one of {:?}",
            config.logging.level, LOG_LEVELS
        )));
    }

    // 3. Every created pool carries the balance algorithm
    if config.bigip.balance.is_empty() {
        errors.push(ValidationError(
            "bigip.balance must not be empty".to_string(),
        ));
    }

    if config.bigip.verify_interval == 0 {
        tracing::warn!("bigip.verifyInterval is 0, the driver will verify continuously");
    }
    if config.bigip.external_addr.is_empty() {
        tracing::warn!("bigip.externalAddr is empty, virtual servers will have no bind address");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::*;

    #[test]
    fn test_valid_config() {
        let config = RouterConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_partitions() {
        let mut config = RouterConfig::default();
        config.bigip.partitions.clear();

        let errs = validate_config(&config).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].0.contains("partitions"));
    }

    #[test]
    fn test_unknown_log_level() {
        let mut config = RouterConfig::default();
        config.logging.level = "loud".into();

        let errs = validate_config(&config).unwrap_err();
        assert!(errs[0].0.contains("logging.level"));
    }

    #[test]
    fn test_empty_balance() {
        let mut config = RouterConfig::default();
        config.bigip.balance.clear();

        let errs = validate_config(&config).unwrap_err();
        assert!(errs[0].0.contains("balance"));
    }
}
