//! Progress reporting for ingestion and backfill.
//!
//! Services emit [`IngestEvent`]s through a [`ProgressReporter`] instead of
//! printing, so the CLI and the server decide how progress is surfaced.

use crate::{BackfillSummary, IngestSummary};

/// Events emitted while ingesting a catalog page or backfilling embeddings.
#[derive(Debug)]
pub enum IngestEvent<'a> {
    /// The catalog page was fetched.
    PageFetched { page: u32, count: usize },
    /// The movie is already stored and was skipped.
    MovieSkipped { id: i64, title: &'a str },
    /// A new record was stored.
    MovieSaved { id: i64, title: &'a str },
    /// Embedding or persistence failed for this movie; processing continues.
    MovieFailed {
        id: i64,
        title: &'a str,
        error: &'a str,
    },
    /// Ingestion of the page finished.
    IngestCompleted { summary: &'a IngestSummary },
    /// An empty embedding was filled in.
    EmbeddingBackfilled { id: i64, title: &'a str },
    /// The backfill run finished.
    BackfillCompleted { summary: &'a BackfillSummary },
}

/// Receiver of progress events.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: IngestEvent<'_>);
}

/// Reporter that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _event: IngestEvent<'_>) {}
}

/// Reporter that logs events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, event: IngestEvent<'_>) {
        match event {
            IngestEvent::PageFetched { page, count } => {
                tracing::info!(page, count, "Fetched catalog page");
            }
            IngestEvent::MovieSkipped { id, title } => {
                tracing::info!(movie_id = id, title, "Movie already stored, skipping");
            }
            IngestEvent::MovieSaved { id, title } => {
                tracing::info!(movie_id = id, title, "Movie saved");
            }
            IngestEvent::MovieFailed { id, title, error } => {
                tracing::warn!(movie_id = id, title, error, "Failed to store movie");
            }
            IngestEvent::IngestCompleted { summary } => {
                tracing::info!(
                    page = summary.page,
                    saved = summary.total_saved,
                    skipped = summary.skipped,
                    failed = summary.failed,
                    "Ingestion completed"
                );
            }
            IngestEvent::EmbeddingBackfilled { id, title } => {
                tracing::info!(movie_id = id, title, "Embedding backfilled");
            }
            IngestEvent::BackfillCompleted { summary } => {
                tracing::info!(
                    updated = summary.total_updated,
                    already_embedded = summary.already_embedded,
                    failed = summary.failed,
                    "Backfill completed"
                );
            }
        }
    }
}
