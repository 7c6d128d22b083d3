//! # board-export
//!
//! Backend library for exporting board images into frame-structured ZIP
//! archives.
//!
//! ## Design Philosophy
//!
//! board-export is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to progress events, no polling
//! - **Host-agnostic** - All board access goes through one [`BoardHost`]
//!   trait the embedding environment implements
//! - **Rate-limit compliant** - Host calls are strictly sequential, each
//!   followed by a configurable pacing delay
//!
//! The produced archive mirrors the board's spatial structure: images inside
//! a frame land in a folder named after that frame, root-level images at the
//! archive root, and every entry gets a collision-free, human-readable name.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use board_export::{BoardExporter, BoardHost, Config};
//! # use board_export::{BoardItem, ContainerInfo, ImageContent, ItemId, NotifyLevel};
//! # struct MyHost;
//! # #[async_trait::async_trait]
//! # impl BoardHost for MyHost {
//! #     async fn get_selection(&self) -> board_export::Result<Vec<BoardItem>> { unimplemented!() }
//! #     async fn get_container(&self, _id: &ItemId) -> board_export::Result<ContainerInfo> { unimplemented!() }
//! #     async fn get_original_content(&self, _id: &ItemId) -> board_export::Result<ImageContent> { unimplemented!() }
//! #     async fn get_original_data_url(&self, _id: &ItemId) -> board_export::Result<String> { unimplemented!() }
//! #     async fn notify(&self, _level: NotifyLevel, _message: &str) {}
//! #     async fn can_open_export_surface(&self) -> bool { true }
//! # }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // MyHost bridges to the board SDK and implements BoardHost.
//!     let exporter = BoardExporter::new(Arc::new(MyHost), Config::default());
//!
//!     // Subscribe to events (progress bar, phase display, ...)
//!     let mut events = exporter.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     exporter.launch().await?;
//!     let artifact = exporter.export().await?;
//!     std::fs::write(&artifact.file_name, &artifact.bytes)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Archive building and the per-entry assembly loop
pub mod archive;
/// External collaborator contract (the host environment)
pub mod board;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Export orchestration and events
pub mod exporter;
/// Spatial grouping and export planning
pub mod grouping;
/// File and folder naming
pub mod naming;
/// Sequential call pacing
pub mod pacing;
/// Per-image content resolution
pub mod resolver;
/// Core types and events
pub mod types;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_util;

// Re-export commonly used types
pub use board::{BoardHost, ImageContent};
pub use config::{ArchiveConfig, Config, NamingConfig, PacingConfig};
pub use error::{Error, Result};
pub use exporter::BoardExporter;
pub use naming::{extension_for_mime, sanitize_name, FileNamer};
pub use pacing::CallPacer;
pub use resolver::ResolvedAsset;
pub use types::{
    BoardItem, ContainerInfo, Event, ExportArtifact, ExportPlanEntry, ItemId, ItemKind,
    NotifyLevel, Phase,
};
