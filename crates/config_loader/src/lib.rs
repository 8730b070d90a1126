//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Read the host key/value configuration surface
//! - Parse the JSON-encoded recipient directory
//! - Parse TOML/JSON settings files (same keys as the host surface)
//! - Validate configuration legality
//! - Generate `NotifierConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("notifier.toml")).unwrap();
//! println!("Recipients: {}", config.recipients.len());
//! ```

mod parser;
mod source;
mod validator;

pub use contracts::NotifierConfig;
pub use parser::{ConfigFormat, Settings};
pub use source::ConfigSource;

use contracts::ContractError;
use std::path::Path;

/// Chat-service auth credential
pub const KEY_TOKEN: &str = "token";
/// JSON object mapping recipient name -> channel id
pub const KEY_USERS: &str = "users";
/// Record field holding the recipient's name
pub const KEY_USER_KEY: &str = "user_key";
/// Chat-service API base URL (optional)
pub const KEY_API_URL: &str = "api_url";
/// Request timeout in seconds (optional)
pub const KEY_TIMEOUT: &str = "timeout";
/// Post as the authenticated bot identity (optional)
pub const KEY_AS_USER: &str = "as_user";

/// Configuration loader
///
/// Provides static methods to load configuration from the host surface, files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Build configuration from a host key/value source
    ///
    /// # Errors
    /// - Required setting missing or empty
    /// - Malformed recipient directory
    /// - Invalid optional setting
    /// - Validation failure
    pub fn from_source(source: &impl ConfigSource) -> Result<NotifierConfig, ContractError> {
        let token = validator::require(source, KEY_TOKEN)?;
        let users = validator::require(source, KEY_USERS)?;
        let user_key = validator::require(source, KEY_USER_KEY)?;

        let recipients = validator::usable_recipients(parser::parse_directory(&users)?);
        let mut config = NotifierConfig::new(token, recipients, user_key);

        if let Some(url) = validator::optional(source, KEY_API_URL) {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(timeout) = validator::optional(source, KEY_TIMEOUT) {
            config.timeout = validator::parse_timeout(&timeout)?;
        }
        if let Some(as_user) = validator::optional(source, KEY_AS_USER) {
            config.as_user = validator::parse_as_user(&as_user)?;
        }

        validator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from settings file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<NotifierConfig, ContractError> {
        let settings = Self::read_settings(path)?;
        Self::from_source(&settings)
    }

    /// Load configuration from settings string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<NotifierConfig, ContractError> {
        let settings = parser::parse(content, format)?;
        Self::from_source(&settings)
    }

    /// Read a settings file into flat host-style key/values without validating
    pub fn read_settings(path: &Path) -> Result<Settings, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        parser::parse(&content, format)
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }
}
