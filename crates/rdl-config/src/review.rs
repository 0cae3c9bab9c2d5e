//! Review session configuration.

use serde::{Deserialize, Serialize};

/// Placeholder author stamped on comments when the caller supplies none.
pub const DEFAULT_AUTHOR: &str = "작성자";

/// Browser-style local timestamp, e.g. `2024. 8. 20. 오후 3:12:45`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y. %-m. %-d. %p %-I:%M:%S";

/// Locale for `%p` and month/day names in comment timestamps.
pub const DEFAULT_TIMESTAMP_LOCALE: &str = "ko_KR";

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_timestamp_locale() -> String {
    DEFAULT_TIMESTAMP_LOCALE.to_string()
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    #[serde(default = "default_author")]
    pub default_author: String,

    /// chrono `strftime` pattern for comment timestamps.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// POSIX locale name (`ko_KR`, `en_US`) used when formatting timestamps.
    #[serde(default = "default_timestamp_locale")]
    pub timestamp_locale: String,

    /// Whether cancelling a finished review also reverts the project's
    /// "review complete" status in the registry.
    #[serde(default = "default_true")]
    pub revert_registry_on_cancel: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            default_author: default_author(),
            timestamp_format: default_timestamp_format(),
            timestamp_locale: default_timestamp_locale(),
            revert_registry_on_cancel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReviewConfig::default();
        assert_eq!(config.default_author, "작성자");
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(config.timestamp_locale, "ko_KR");
        assert!(config.revert_registry_on_cancel);
    }
}
