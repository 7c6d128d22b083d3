//! Configuration types for board-export

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Call pacing configuration
///
/// The board API enforces a call-rate ceiling; every host call the pipeline
/// makes is followed by this fixed delay. Sequential pacing is a deliberate
/// compliance mechanism, not an artifact to parallelize away.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Delay between consecutive host API calls, in milliseconds (default: 150)
    #[serde(default = "default_delay_between_calls_ms")]
    pub delay_between_calls_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            delay_between_calls_ms: default_delay_between_calls_ms(),
        }
    }
}

/// File naming configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Use item titles as file names where available (default: true)
    ///
    /// When false, or when an item has no usable title, files are named
    /// `image-NNN.ext` by their 1-based rank within the folder.
    #[serde(default = "default_true")]
    pub use_item_titles: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            use_item_titles: true,
        }
    }
}

/// Archive output configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Suggested download file name for the produced archive
    /// (default: "board-export-images.zip")
    #[serde(default = "default_archive_file_name")]
    pub file_name: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            file_name: default_archive_file_name(),
        }
    }
}

/// Main configuration for [`crate::BoardExporter`]
///
/// Fields are organized into logical sub-configs:
/// - [`pacing`](PacingConfig) — inter-call delay (rate-limit compliance)
/// - [`naming`](NamingConfig) — the title-vs-numeric file naming toggle
/// - [`archive`](ArchiveConfig) — archive download file name
///
/// All sub-config fields are flattened for serialization, so the JSON shape
/// stays flat. Individual fields are also accessible via accessor methods on
/// `Config` for convenience. There is no config file loader and no
/// environment lookup — the embedding host constructs this value directly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Host call pacing
    #[serde(flatten)]
    pub pacing: PacingConfig,

    /// File naming policy
    #[serde(flatten)]
    pub naming: NamingConfig,

    /// Archive output settings
    #[serde(flatten)]
    pub archive: ArchiveConfig,
}

// Convenience accessors — call sites read `config.delay_between_calls()`
// instead of reaching through the sub-config structs.
impl Config {
    /// Delay awaited after each host API call
    pub fn delay_between_calls(&self) -> Duration {
        Duration::from_millis(self.pacing.delay_between_calls_ms)
    }

    /// Whether item titles are used as file names
    pub fn use_item_titles(&self) -> bool {
        self.naming.use_item_titles
    }

    /// Suggested download file name for the produced archive
    pub fn archive_file_name(&self) -> &str {
        &self.archive.file_name
    }
}

fn default_delay_between_calls_ms() -> u64 {
    150
}

fn default_true() -> bool {
    true
}

fn default_archive_file_name() -> String {
    "board-export-images.zip".to_string()
}
