//! # rdl-config
//!
//! Layered configuration loading for Redline using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REDLINE_*` prefix, `__` as separator)
//! 2. Project-level `.redline/config.toml`
//! 3. User-level `~/.config/redline/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `REDLINE_REVIEW__DEFAULT_AUTHOR` -> `review.default_author`,
//! `REDLINE_GENERAL__PAGE_SIZE` -> `general.page_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use rdl_config::RedlineConfig;
//!
//! let config = RedlineConfig::load_with_dotenv().expect("config");
//! println!("comments are signed by {}", config.review.default_author);
//! ```

mod error;
mod export;
mod general;
mod review;

pub use error::ConfigError;
pub use export::ExportConfig;
pub use general::GeneralConfig;
pub use review::{DEFAULT_AUTHOR, DEFAULT_TIMESTAMP_FORMAT, DEFAULT_TIMESTAMP_LOCALE, ReviewConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RedlineConfig {
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RedlineConfig {
    /// Load configuration from all sources rooted at the current directory.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration with project-level config looked up under `root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load_from(root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_in(root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain for the current directory.
    pub fn figment() -> Figment {
        Self::figment_in(Path::new("."))
    }

    /// Build the figment provider chain with `root/.redline/config.toml` as
    /// the project layer.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment_in(root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = root.join(".redline").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("REDLINE_").split("__"))
    }

    /// Reject values the review and listing code cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.review.default_author.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "review.default_author".into(),
                reason: "must not be blank".into(),
            });
        }
        if self.review.timestamp_format.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "review.timestamp_format".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("redline").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RedlineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.page_size, 5);
        assert_eq!(config.export.output_dir, "exports");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut config = RedlineConfig::default();
        config.general.page_size = 0;
        let err = config.validate().expect_err("should fail");
        assert!(err.to_string().contains("general.page_size"));
    }

    #[test]
    fn blank_author_is_rejected() {
        let mut config = RedlineConfig::default();
        config.review.default_author = "   ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "review.default_author"
        ));
    }
}
