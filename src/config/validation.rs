use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::url::validate_origin;
use crate::ConfigError;
use std::collections::HashSet;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site and its state list
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_origin(&config.origin)?;

    if config.states.is_empty() {
        return Err(ConfigError::Validation(
            "states must list at least one state code".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for state in &config.states {
        if !seen.insert(state) {
            return Err(ConfigError::Validation(format!(
                "state '{}' is listed more than once",
                state
            )));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 256 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 256, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_cities_per_state == Some(0) {
        return Err(ConfigError::Validation(
            "max_cities_per_state must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact_url) = &config.contact_url {
        ::url::Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    for (key, name) in [
        ("cities_file", &config.cities_file),
        ("locations_file", &config.locations_file),
    ] {
        if name.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(ConfigError::Validation(format!(
                "{} must be a plain file name, got '{}'",
                key, name
            )));
        }
    }

    if config.cities_file == config.locations_file {
        return Err(ConfigError::Validation(format!(
            "cities_file and locations_file must differ, both are '{}'",
            config.cities_file
        )));
    }

    Ok(())
}
