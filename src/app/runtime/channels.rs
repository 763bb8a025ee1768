use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::logic::{ChartPipeline, EnrichmentOutcome, PipelineOutcome};
use crate::net::ChartApi;
use crate::state::{EnrichmentJob, QueryInput, SearchOutcome, SubmitJob};

use super::workers::{spawn_chart_worker, spawn_enrichment_worker, spawn_search_worker};

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - Workers only ever send on these channels; the event loop owns every receiver and is
///   the sole mutator of `AppState`
pub struct Channels {
    /// Terminal events from the input thread.
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Receiver side of `event_tx`.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Set on exit to stop the input thread.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Location queries for the debounce worker.
    pub query_tx: mpsc::UnboundedSender<QueryInput>,
    /// Search answers tagged with their generation.
    pub search_rx: mpsc::UnboundedReceiver<SearchOutcome>,
    /// Submissions for the chart worker.
    pub submit_tx: mpsc::UnboundedSender<SubmitJob>,
    /// Pipeline results tagged with their submission id.
    pub pipeline_rx: mpsc::UnboundedReceiver<PipelineOutcome>,
    /// Enrichment requests fired after a chart is shown.
    pub enrich_tx: mpsc::UnboundedSender<EnrichmentJob>,
    /// Enrichment answers tagged with their chart id.
    pub enrichment_rx: mpsc::UnboundedReceiver<EnrichmentOutcome>,
}

impl Channels {
    /// What: Create all channels and spawn the background workers that serve them.
    ///
    /// Inputs:
    /// - `api`: Service client used by the search worker
    /// - `pipeline`: Pipeline used by the chart and enrichment workers
    /// - `settings`: Search limit and debounce window
    ///
    /// Output:
    /// - Returns a `Channels` struct with all senders and receivers initialized
    pub fn new(api: Arc<dyn ChartApi>, pipeline: ChartPipeline, settings: &Settings) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();
        let event_thread_cancelled = Arc::new(AtomicBool::new(false));

        let (query_tx, query_rx) = mpsc::unbounded_channel::<QueryInput>();
        let (search_tx, search_rx) = mpsc::unbounded_channel::<SearchOutcome>();
        spawn_search_worker(
            query_rx,
            search_tx,
            api,
            settings.search_limit,
            Duration::from_millis(settings.search_debounce_ms),
        );

        let (submit_tx, submit_rx) = mpsc::unbounded_channel::<SubmitJob>();
        let (pipeline_tx, pipeline_rx) = mpsc::unbounded_channel::<PipelineOutcome>();
        spawn_chart_worker(submit_rx, pipeline_tx, pipeline.clone());

        let (enrich_tx, enrich_rx) = mpsc::unbounded_channel::<EnrichmentJob>();
        let (enrichment_tx, enrichment_rx) = mpsc::unbounded_channel::<EnrichmentOutcome>();
        spawn_enrichment_worker(enrich_rx, enrichment_tx, pipeline);

        Self {
            event_tx,
            event_rx,
            event_thread_cancelled,
            query_tx,
            search_rx,
            submit_tx,
            pipeline_rx,
            enrich_tx,
            enrichment_rx,
        }
    }
}
