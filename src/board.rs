//! The external collaborator contract
//!
//! The export pipeline never talks to a board directly; it goes through
//! [`BoardHost`], implemented by the embedding host environment (the board
//! plugin runtime). This keeps the core testable and keeps all UI plumbing
//! (modal wiring, buttons, notification rendering) outside the crate.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BoardItem, ContainerInfo, ItemId, NotifyLevel};

/// Binary image content as reported by the host
#[must_use]
#[derive(Debug, Clone)]
pub struct ImageContent {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// Content type reported by the host (e.g. "image/png"), if any
    pub content_type: Option<String>,
}

/// Host environment the exporter runs against
///
/// Implementations bridge to the board's SDK. All methods are awaited
/// sequentially by the pipeline, each followed by the configured pacing
/// delay; no timeouts are applied on top, so a host call that never resolves
/// stalls the run (known gap, the in-flight guard only blocks re-entrant
/// starts).
#[async_trait]
pub trait BoardHost: Send + Sync {
    /// Current selection on the board; may be empty
    ///
    /// # Errors
    ///
    /// Returns an error if the selection cannot be read at all (e.g. the
    /// session is gone). This aborts the run.
    async fn get_selection(&self) -> Result<Vec<BoardItem>>;

    /// Resolve a container (frame) by id
    ///
    /// # Errors
    ///
    /// Returns an error if the container is deleted or inaccessible. The
    /// grouper catches this and substitutes [`ContainerInfo::anonymous`];
    /// it is never propagated.
    async fn get_container(&self, id: &ItemId) -> Result<ContainerInfo>;

    /// Fetch an image's original-quality file content (primary path)
    ///
    /// # Errors
    ///
    /// Any error here triggers the data-URL fallback path.
    async fn get_original_content(&self, id: &ItemId) -> Result<ImageContent>;

    /// Fetch a base64 `data:` URI for an image's original content
    ///
    /// Used only after [`BoardHost::get_original_content`] has failed.
    ///
    /// # Errors
    ///
    /// An error here exhausts content resolution and aborts the run.
    async fn get_original_data_url(&self, id: &ItemId) -> Result<String>;

    /// Show a notification to the user
    ///
    /// Fire-and-forget: the pipeline never consults a return value.
    async fn notify(&self, level: NotifyLevel, message: &str);

    /// Whether the export surface (modal) can currently be opened
    ///
    /// Launch-time precondition checked by [`crate::BoardExporter::launch`];
    /// not part of the run pipeline itself.
    async fn can_open_export_surface(&self) -> bool;
}
