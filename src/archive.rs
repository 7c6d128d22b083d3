//! Archive assembly
//!
//! `ArchiveBuilder` wraps the ZIP writer over an in-memory buffer;
//! [`assemble`] drives the per-entry pipeline (resolve → name → insert) in
//! plan order and reports banded progress after each insertion. Any error
//! aborts immediately; no partial archive escapes this module.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::board::BoardHost;
use crate::error::Result;
use crate::naming::{extension_for_mime, FileNamer};
use crate::pacing::CallPacer;
use crate::resolver;
use crate::types::ExportPlanEntry;

/// Progress band reserved for entry assembly: 10% through 90%.
///
/// The orchestrator owns the checkpoints outside this band (0 selection,
/// 5 plan, 95 finalize, 100 done).
const ASSEMBLY_BAND_START: f32 = 10.0;
const ASSEMBLY_BAND_WIDTH: f32 = 80.0;

/// In-memory ZIP archive under construction
///
/// Entry paths are POSIX-style (`folder/name.ext` or bare `name.ext`).
/// Duplicate paths are accepted by the writer; the planner is responsible
/// for avoiding them where that matters.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    entries: usize,
}

impl ArchiveBuilder {
    /// Start an empty archive
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            entries: 0,
        }
    }

    /// Append one Deflate-compressed entry
    ///
    /// # Errors
    ///
    /// Fails if the entry header or payload cannot be written.
    pub fn add_entry(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer.start_file(path, options)?;
        self.writer.write_all(bytes)?;
        self.entries += 1;
        Ok(())
    }

    /// Number of entries written so far
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Finalize the archive and return its bytes
    ///
    /// # Errors
    ///
    /// Fails if the central directory cannot be written.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ArchiveBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveBuilder")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Drive the per-entry pipeline for a whole export plan
///
/// For each entry, in plan order: resolve content, derive the extension from
/// the resolved content type, choose a file name within the entry's folder
/// scope, and insert the payload at `folder/name` (or bare `name` at the
/// root). After each insertion `report` receives a percentage interpolated
/// linearly across the 10–90 band and a short status line.
///
/// Returns the builder unfinished: the orchestrator finalizes it after
/// emitting its own finalization checkpoint.
///
/// # Errors
///
/// The first resolution or insertion error aborts the loop and propagates.
pub async fn assemble<F>(
    host: &dyn BoardHost,
    pacer: &CallPacer,
    namer: &mut FileNamer,
    plan: &[ExportPlanEntry],
    mut report: F,
) -> Result<ArchiveBuilder>
where
    F: FnMut(f32, String),
{
    let total = plan.len();
    let mut builder = ArchiveBuilder::new();

    for (i, entry) in plan.iter().enumerate() {
        let asset = resolver::resolve(host, pacer, &entry.item.id).await?;
        let extension = extension_for_mime(asset.content_type.as_deref());
        let file_name = namer.choose(
            &entry.folder_name,
            entry.item.title.as_deref(),
            &extension,
            entry.index_in_folder,
        );
        let path = if entry.folder_name.is_empty() {
            file_name
        } else {
            format!("{}/{}", entry.folder_name, file_name)
        };

        builder.add_entry(&path, &asset.bytes)?;
        tracing::debug!(path = %path, bytes = asset.bytes.len(), "archive entry written");

        let done = i + 1;
        let percent = ASSEMBLY_BAND_START + ASSEMBLY_BAND_WIDTH * done as f32 / total as f32;
        report(percent, format!("Exporting {done} / {total}…"));
    }

    Ok(builder)
}
