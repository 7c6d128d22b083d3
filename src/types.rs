//! Core types and events for board-export

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a board item
///
/// Board item ids are opaque strings assigned by the host environment.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new ItemId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board item type discriminator
///
/// Only [`ItemKind::Image`] items are processed by the export pipeline;
/// everything else is filtered out of the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// An image item
    Image,
    /// A frame (rectangular grouping region that can parent other items)
    Frame,
    /// Any other item type the board may report
    #[serde(other)]
    Other,
}

/// Metadata of one selected board item
///
/// Coordinates are board-space positions of the item center, as reported by
/// the host. `parent_id` references the enclosing frame, if any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardItem {
    /// Item identifier
    pub id: ItemId,
    /// Type discriminator
    pub kind: ItemKind,
    /// Item title, if the user named it
    #[serde(default)]
    pub title: Option<String>,
    /// Enclosing container (frame) id, if any
    #[serde(default)]
    pub parent_id: Option<ItemId>,
    /// Board x coordinate
    pub x: f64,
    /// Board y coordinate
    pub y: f64,
}

/// Container (frame) metadata resolved through the host
///
/// A container that fails to resolve degrades to `{ title: None, x: 0.0,
/// y: 0.0 }` (the anonymous container) and the run continues.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Frame title, if set
    #[serde(default)]
    pub title: Option<String>,
    /// Board x coordinate
    pub x: f64,
    /// Board y coordinate
    pub y: f64,
}

impl ContainerInfo {
    /// The anonymous container substituted when resolution fails.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            title: None,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// One planned archive entry: an image, the folder it lands in, and its
/// 1-based rank within that folder's display order
///
/// Invariant: indices within a folder form a contiguous 1-based sequence;
/// entries are globally ordered folder-major (root first, then containers in
/// ascending position order), image-minor (ascending position order within
/// each scope). An empty `folder_name` denotes the archive root.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportPlanEntry {
    /// The image to export
    pub item: BoardItem,
    /// Folder the entry belongs to ("" = archive root)
    pub folder_name: String,
    /// 1-based rank within the folder's display order
    pub index_in_folder: usize,
}

/// Notification severity for the host's user-notification sink
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    /// Informational message
    Info,
    /// Error message
    Error,
}

/// Export run phase
///
/// `Done` and `Failed` are terminal. Any error raised in any phase
/// transitions directly to `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No run in flight
    Idle,
    /// Reading the current selection and filtering to images
    FetchingSelection,
    /// Resolving frames and building the export plan
    GroupingByFrame,
    /// Resolving content and inserting archive entries
    Assembling,
    /// Compressing the final archive
    Finalizing,
    /// Run completed successfully
    Done,
    /// Run aborted with an error
    Failed,
}

/// Event emitted during an export run
///
/// Consumers subscribe via [`crate::BoardExporter::subscribe`]. Progress
/// percentages are in `[0, 100]`, monotonically non-decreasing within a run,
/// and reach exactly 100 only on successful completion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The run moved to a new phase
    PhaseChanged {
        /// The phase just entered
        phase: Phase,
    },

    /// Progress update
    Progress {
        /// Percentage in `[0, 100]`
        percent: f32,
        /// Short human-readable status line
        status: String,
    },

    /// Run completed; the archive artifact is available for download
    Completed {
        /// Number of images written into the archive
        exported: usize,
        /// Suggested download file name
        archive_file_name: String,
    },

    /// Run aborted
    Failed {
        /// Short human-readable failure message
        error: String,
    },
}

/// The finalized export artifact carried by a successful run
#[must_use]
#[derive(Clone)]
pub struct ExportArtifact {
    /// Suggested download file name (from [`crate::config::ArchiveConfig`])
    pub file_name: String,
    /// The compressed archive bytes
    pub bytes: Vec<u8>,
    /// Number of images written into the archive
    pub exported: usize,
    /// When the run finished
    pub completed_at: DateTime<Utc>,
}

impl std::fmt::Debug for ExportArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Elide the payload: artifacts can be tens of megabytes.
        f.debug_struct("ExportArtifact")
            .field("file_name", &self.file_name)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .field("exported", &self.exported)
            .field("completed_at", &self.completed_at)
            .finish()
    }
}
