//! Export configuration.

use rdl_core::enums::ExportFormat;
use serde::{Deserialize, Serialize};

fn default_output_dir() -> String {
    "exports".to_string()
}

const fn default_format() -> ExportFormat {
    ExportFormat::Pdf
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Where artifacts are saved, relative to the working directory unless absolute.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Format used when `rdl review export` is called without `--as`.
    #[serde(default = "default_format")]
    pub default_format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
        }
    }
}
