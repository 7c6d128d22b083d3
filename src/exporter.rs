//! Export orchestration
//!
//! `BoardExporter` owns one host connection and sequences the run state
//! machine: `FetchingSelection → GroupingByFrame → Assembling → Finalizing →
//! Done`, with any error transitioning straight to `Failed`. Consumers
//! observe the run through a broadcast event channel; the host's
//! notification sink receives the terminal outcome.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;

use crate::archive;
use crate::board::BoardHost;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::grouping;
use crate::naming::FileNamer;
use crate::pacing::CallPacer;
use crate::types::{BoardItem, Event, ExportArtifact, ItemKind, NotifyLevel, Phase};

/// Event channel capacity; a slow subscriber lagging this far behind
/// receives `RecvError::Lagged` rather than stalling the run.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Notification shown when the export surface cannot be opened.
const SURFACE_UNAVAILABLE_MESSAGE: &str = "Please close other dialogs and try again.";

/// Progress percentage tracker: clamps into `[0, 100]` and never goes
/// backwards within a run, so subscribers can drive a progress bar directly.
struct ProgressReporter {
    tx: broadcast::Sender<Event>,
    last: f32,
}

impl ProgressReporter {
    fn new(tx: broadcast::Sender<Event>) -> Self {
        Self { tx, last: 0.0 }
    }

    fn report(&mut self, percent: f32, status: impl Into<String>) {
        let clamped = percent.clamp(0.0, 100.0).max(self.last);
        self.last = clamped;
        // send() fails only when no one is subscribed, which is fine.
        self.tx
            .send(Event::Progress {
                percent: clamped,
                status: status.into(),
            })
            .ok();
    }
}

/// Main exporter instance (cloneable - all fields are Arc-wrapped)
///
/// One exporter serves one board host. Runs are strictly sequential: a
/// second [`BoardExporter::export`] while one is in flight is rejected with
/// [`Error::ExportInProgress`]. There is no mid-run cancellation.
#[derive(Clone)]
pub struct BoardExporter {
    host: Arc<dyn BoardHost>,
    config: Arc<Config>,
    event_tx: broadcast::Sender<Event>,
    in_flight: Arc<AtomicBool>,
}

impl BoardExporter {
    /// Create a new exporter for the given host
    pub fn new(host: Arc<dyn BoardHost>, config: Config) -> Self {
        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            host,
            config: Arc::new(config),
            event_tx,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to run events
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently. Events emitted before a subscription are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Launch-time precondition check for the export surface
    ///
    /// Call before opening the export modal. When the surface cannot be
    /// opened the user is notified and no run is started.
    ///
    /// # Errors
    ///
    /// [`Error::SurfaceUnavailable`] when the host reports the surface as
    /// blocked.
    pub async fn launch(&self) -> Result<()> {
        if self.host.can_open_export_surface().await {
            Ok(())
        } else {
            tracing::warn!("export surface unavailable at launch");
            self.host
                .notify(NotifyLevel::Error, SURFACE_UNAVAILABLE_MESSAGE)
                .await;
            Err(Error::SurfaceUnavailable)
        }
    }

    /// Run one export end to end
    ///
    /// Reads the selection, filters to images, builds the grouped plan,
    /// assembles the archive, and finalizes it. Progress and phase events
    /// stream to subscribers throughout; the terminal outcome is also
    /// pushed to the host's notification sink (except the zero-images case,
    /// which is surfaced in-modal only).
    ///
    /// # Errors
    ///
    /// - [`Error::ExportInProgress`] if a run is already in flight
    /// - [`Error::NoImagesSelected`] if the selection holds no images
    /// - any fatal pipeline error (content resolution, archive assembly,
    ///   selection fetch)
    pub async fn export(&self) -> Result<ExportArtifact> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::warn!("re-entrant export start rejected");
            return Err(Error::ExportInProgress);
        }

        let result = self.run().await;
        self.in_flight.store(false, Ordering::SeqCst);

        match &result {
            Ok(artifact) => {
                tracing::info!(
                    exported = artifact.exported,
                    archive = %artifact.file_name,
                    bytes = artifact.bytes.len(),
                    "export complete"
                );
                self.host
                    .notify(
                        NotifyLevel::Info,
                        &format!(
                            "Exported {} image(s). Download the ZIP from the export panel.",
                            artifact.exported
                        ),
                    )
                    .await;
            }
            Err(Error::NoImagesSelected) => {
                // Shown inside the export surface; no board-level toast.
                tracing::info!("export aborted: selection holds no images");
                self.set_phase(Phase::Failed);
                self.emit(Event::Failed {
                    error: Error::NoImagesSelected.user_message(),
                });
            }
            Err(error) => {
                tracing::error!(error = %error, "export run failed");
                self.set_phase(Phase::Failed);
                let message = error.user_message();
                self.emit(Event::Failed {
                    error: message.clone(),
                });
                self.host.notify(NotifyLevel::Error, &message).await;
            }
        }

        result
    }

    async fn run(&self) -> Result<ExportArtifact> {
        let pacer = CallPacer::new(self.config.delay_between_calls());
        let mut progress = ProgressReporter::new(self.event_tx.clone());

        self.set_phase(Phase::FetchingSelection);
        progress.report(0.0, "Getting selection…");
        let selection = self.host.get_selection().await?;
        pacer.pause().await;

        let images: Vec<BoardItem> = selection
            .into_iter()
            .filter(|item| item.kind == ItemKind::Image)
            .collect();
        if images.is_empty() {
            return Err(Error::NoImagesSelected);
        }
        progress.report(
            5.0,
            format!("Found {} image(s). Resolving frames…", images.len()),
        );

        self.set_phase(Phase::GroupingByFrame);
        let plan = grouping::build_export_plan(self.host.as_ref(), &pacer, images).await?;
        let total = plan.len();

        self.set_phase(Phase::Assembling);
        let mut namer = FileNamer::new(self.config.use_item_titles());
        let builder = archive::assemble(self.host.as_ref(), &pacer, &mut namer, &plan, |p, s| {
            progress.report(p, s)
        })
        .await?;

        self.set_phase(Phase::Finalizing);
        progress.report(95.0, "Creating ZIP…");
        let bytes = builder.finish()?;
        progress.report(100.0, format!("Done. {total} image(s) in ZIP."));

        self.set_phase(Phase::Done);
        let artifact = ExportArtifact {
            file_name: self.config.archive_file_name().to_string(),
            bytes,
            exported: total,
            completed_at: Utc::now(),
        };
        self.emit(Event::Completed {
            exported: total,
            archive_file_name: artifact.file_name.clone(),
        });
        Ok(artifact)
    }

    fn set_phase(&self, phase: Phase) {
        tracing::info!(?phase, "export phase");
        self.emit(Event::PhaseChanged { phase });
    }

    fn emit(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}
