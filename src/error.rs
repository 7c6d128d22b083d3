//! Error types for board-export
//!
//! The pipeline recovers exactly one failure class internally (container
//! resolution, downgraded to an anonymous frame by the grouper). Every other
//! failure aborts the run and surfaces a single human-readable message.

use thiserror::Error;

/// Result type alias for board-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when the selection contains no image items.
pub const NO_IMAGES_MESSAGE: &str =
    "No images selected. Select one or more image items on the board, then try Export again.";

/// Generic failure message used when an error carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Export failed.";

/// Main error type for board-export
///
/// Each variant includes the context needed to diagnose a failed run. Only
/// the user-recoverable variants (see [`Error::is_user_recoverable`]) leave
/// the host free to offer a retry; the rest are fatal to the run that raised
/// them.
#[derive(Debug, Error)]
pub enum Error {
    /// The current selection contains no image items
    #[error("no images selected")]
    NoImagesSelected,

    /// A host API call failed where no internal recovery is specified
    #[error("board call '{operation}' failed: {reason}")]
    Board {
        /// The host operation that failed (e.g. "get_selection")
        operation: String,
        /// Host-reported failure reason
        reason: String,
    },

    /// Binary content could not be resolved for an image (both the primary
    /// and the fallback path are exhausted)
    #[error("content resolution failed for item {id}: {reason}")]
    ContentResolution {
        /// The board item whose content could not be fetched
        id: String,
        /// Why the final attempt failed
        reason: String,
    },

    /// Archive entry insertion or finalization failed
    #[error("archive assembly error: {0}")]
    ArchiveAssembly(#[from] zip::result::ZipError),

    /// I/O error while writing archive data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The export surface (modal) cannot be opened right now
    #[error("export surface unavailable")]
    SurfaceUnavailable,

    /// An export run is already in flight; re-entrant starts are rejected
    #[error("an export is already in progress")]
    ExportInProgress,

    /// Serialization error (event/config bridging to the host)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Short human-readable message suitable for showing to the end user.
    ///
    /// [`Error::NoImagesSelected`] maps to its dedicated UI message; any
    /// other variant uses its `Display` output, falling back to
    /// [`GENERIC_FAILURE_MESSAGE`] if that output is empty.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Error::NoImagesSelected => NO_IMAGES_MESSAGE.to_string(),
            other => {
                let message = other.to_string();
                if message.is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message
                }
            }
        }
    }

    /// Whether the failure is recoverable at the UI level (message shown,
    /// control re-enabled) rather than a hard pipeline fault.
    #[must_use]
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NoImagesSelected | Error::SurfaceUnavailable | Error::ExportInProgress
        )
    }
}
