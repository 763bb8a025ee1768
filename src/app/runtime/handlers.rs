use tokio::sync::mpsc;

use crate::logic::{EnrichmentOutcome, PipelineOutcome};
use crate::state::{AppState, EnrichmentJob, SearchApply, SearchOutcome};

/// What: Handle a search answer from the debounce worker.
///
/// Inputs:
/// - `app`: Application state
/// - `outcome`: Answer tagged with its query generation
///
/// Output:
/// - `true` when the answer was current and applied
///
/// Details:
/// - Superseded answers are dropped by the resolver's generation check
pub fn handle_search_outcome(app: &mut AppState, outcome: SearchOutcome) -> bool {
    app.resolver_mut()
        .apply_search_result(outcome.id, outcome.result)
        == SearchApply::Applied
}

/// What: Handle a finished pipeline run.
///
/// Inputs:
/// - `app`: Application state
/// - `outcome`: Run result tagged with its submission id
/// - `enrich_tx`: Channel sender for the enrichment worker
///
/// Details:
/// - The chart view is committed first; the enrichment request is sent afterwards so the
///   view never waits on it
pub fn handle_pipeline_outcome(
    app: &mut AppState,
    outcome: PipelineOutcome,
    enrich_tx: &mpsc::UnboundedSender<EnrichmentJob>,
) {
    if let Some(job) = app.apply_pipeline_outcome(outcome.id, outcome.result) {
        tracing::debug!(chart_id = job.chart_id, "chart shown, requesting hidden stems");
        let _ = enrich_tx.send(job);
    }
}

/// Merge enrichment data into the chart it belongs to; late data for a discarded chart is dropped.
pub fn handle_enrichment(app: &mut AppState, outcome: &EnrichmentOutcome) {
    app.apply_enrichment(outcome.chart_id, &outcome.data);
}
