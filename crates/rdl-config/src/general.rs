//! General application configuration.

use serde::{Deserialize, Serialize};

/// Rows per page in the project list and search results.
const fn default_page_size() -> u32 {
    5
}

/// Entries in the dashboard's recent-uploads list.
const fn default_dashboard_recent() -> u32 {
    10
}

fn default_state_dir() -> String {
    ".redline".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_dashboard_recent")]
    pub dashboard_recent: u32,

    /// Directory holding `state.json` and the review trail, relative to the
    /// working directory unless absolute.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            dashboard_recent: default_dashboard_recent(),
            state_dir: default_state_dir(),
        }
    }
}
