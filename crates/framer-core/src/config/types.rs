//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Input scanning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to pick up, matched case-sensitively.
    /// A leading dot is optional ("png" and ".png" are equivalent).
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".png".to_string(), ".jpg".to_string(), ".jpeg".to_string()],
        }
    }
}

impl ScanConfig {
    /// Extensions with the leading dot ensured.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| {
                if ext.starts_with('.') {
                    ext.clone()
                } else {
                    format!(".{ext}")
                }
            })
            .collect()
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,

    /// Header read timeout in milliseconds
    pub decode_timeout_ms: u64,

    /// Full decode + transform + encode timeout in milliseconds
    pub encode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_dimension: 20000,
            decode_timeout_ms: 5000,
            encode_timeout_ms: 60000,
        }
    }
}

/// Output directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Remove existing entries in the output directory before writing
    pub clear_existing: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clear_existing: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: pretty or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
