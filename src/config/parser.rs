use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Environment overrides are applied before validation.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(content)?;

    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

/// Builds the default configuration with environment overrides applied
pub fn load_default() -> Result<Config, ConfigError> {
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Applies `PROXIES` and `CATALOG_URL` from the process environment
///
/// `PROXIES` is a comma-separated list and replaces the configured proxies.
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(proxies) = std::env::var("PROXIES") {
        config.http.proxies = parse_proxy_list(&proxies);
    }

    if let Ok(catalog_url) = std::env::var("CATALOG_URL") {
        if !catalog_url.trim().is_empty() {
            config.site.catalog_url = catalog_url.trim().to_string();
        }
    }
}

fn parse_proxy_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Hex SHA-256 of the configuration file content
///
/// Logged at startup so a resumed run can be matched with the config it used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read(path)?;
    Ok(content_hash(&content))
}

fn content_hash(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Loads a configuration together with the hash of the exact bytes parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, content_hash(content.as_bytes())))
}
