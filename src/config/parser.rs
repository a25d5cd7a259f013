use crate::config::types::{Config, CrawlSettings};
use crate::config::validation::{compile, validate};
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates the TOML configuration at `path`
///
/// # Returns
///
/// * `Ok(Config)` - A configuration that passed validation
/// * `Err(ConfigError)` - The file is unreadable, not valid TOML, or holds
///   out-of-range values
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Reads a configuration file straight into runtime settings
///
/// Validation runs once, as part of compiling the parsed document.
pub fn load_settings(path: &Path) -> Result<CrawlSettings, ConfigError> {
    compile(&toml::from_str(&std::fs::read_to_string(path)?)?)
}

/// Hex-encoded SHA-256 of the configuration file
///
/// Logged at startup so a result can be traced back to the exact
/// configuration that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    Ok(sha256_hex(&std::fs::read_to_string(path)?))
}

/// Loads a configuration together with the hash of the text it came from
///
/// The file is read once, so the hash always describes the parsed content.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let config = parse_config(&text)?;
    Ok((config, sha256_hex(&text)))
}

/// Loads runtime settings together with the hash of the text they came from
pub fn load_settings_with_hash(path: &Path) -> Result<(CrawlSettings, String), ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&text)?;
    Ok((compile(&config)?, sha256_hex(&text)))
}

fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
