use tokio::sync::mpsc;

use crate::logic::{ChartPipeline, EnrichmentOutcome, PipelineOutcome};
use crate::state::{EnrichmentJob, SubmitJob};

/// What: Spawn background worker running chart submissions.
///
/// Inputs:
/// - `submit_rx`: Channel receiver for validated submissions
/// - `pipeline_tx`: Channel sender for tagged pipeline results
/// - `pipeline`: Pipeline over the service client
///
/// Details:
/// - Steps of one run are awaited in order inside a single task
/// - Each submission gets its own task; the handler ignores results for superseded ids
pub fn spawn_chart_worker(
    mut submit_rx: mpsc::UnboundedReceiver<SubmitJob>,
    pipeline_tx: mpsc::UnboundedSender<PipelineOutcome>,
    pipeline: ChartPipeline,
) {
    tokio::spawn(async move {
        while let Some(job) = submit_rx.recv().await {
            let tx = pipeline_tx.clone();
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                let result = pipeline.run(&job.request).await;
                let _ = tx.send(PipelineOutcome { id: job.id, result });
            });
        }
    });
}

/// What: Spawn background worker firing detached enrichment calls.
///
/// Inputs:
/// - `enrich_rx`: Channel receiver for enrichment requests of displayed charts
/// - `enrichment_tx`: Channel sender for hidden-stem answers tagged by chart id
/// - `pipeline`: Pipeline over the service client
///
/// Details:
/// - Failures are logged by the pipeline and produce no message at all
pub fn spawn_enrichment_worker(
    mut enrich_rx: mpsc::UnboundedReceiver<EnrichmentJob>,
    enrichment_tx: mpsc::UnboundedSender<EnrichmentOutcome>,
    pipeline: ChartPipeline,
) {
    tokio::spawn(async move {
        while let Some(job) = enrich_rx.recv().await {
            let tx = enrichment_tx.clone();
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                if let Some(data) = pipeline.enrich(&job.request).await {
                    let _ = tx.send(EnrichmentOutcome {
                        chart_id: job.chart_id,
                        data,
                    });
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::i18n::Language;
    use crate::logic::PipelineRequest;
    use crate::logic::pipeline::hidden_stems_request;
    use crate::net::fake::{Scripted, ScriptedApi, sample_pillars};
    use crate::net::{HIDDEN_STEMS_PATH, ServiceError};
    use crate::state::ResolvedLocation;

    #[tokio::test]
    /// What: A failed enrichment sends nothing; a successful one is tagged with its chart id.
    ///
    /// Inputs:
    /// - Enrichment worker over a failing API, then over a succeeding one
    ///
    /// Output:
    /// - No message on failure; one message with `chart_id` 5 on success
    async fn enrichment_failure_is_silent() {
        let req = hidden_stems_request(&sample_pillars().four_pillars);

        let failing = Arc::new(ScriptedApi {
            hidden: Scripted::now(Err(ServiceError::Transport("down".into()))),
            ..ScriptedApi::default()
        });
        let (jtx, jrx) = mpsc::unbounded_channel();
        let (otx, mut orx) = mpsc::unbounded_channel();
        spawn_enrichment_worker(jrx, otx, ChartPipeline::new(failing.clone()));
        jtx.send(EnrichmentJob {
            chart_id: 4,
            request: req.clone(),
        })
        .expect("worker alive");
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(orx.try_recv().is_err());
        assert_eq!(failing.count(HIDDEN_STEMS_PATH), 1);

        let (jtx, jrx) = mpsc::unbounded_channel();
        let (otx, mut orx) = mpsc::unbounded_channel();
        spawn_enrichment_worker(jrx, otx, ChartPipeline::new(Arc::new(ScriptedApi::default())));
        jtx.send(EnrichmentJob {
            chart_id: 5,
            request: req,
        })
        .expect("worker alive");
        let out = tokio::time::timeout(Duration::from_secs(2), orx.recv())
            .await
            .ok()
            .flatten()
            .expect("enrichment answer");
        assert_eq!(out.chart_id, 5);
    }

    #[tokio::test]
    async fn chart_worker_tags_results_with_submission_id() {
        let (stx, srx) = mpsc::unbounded_channel();
        let (ptx, mut prx) = mpsc::unbounded_channel();
        spawn_chart_worker(srx, ptx, ChartPipeline::new(Arc::new(ScriptedApi::default())));
        stx.send(SubmitJob {
            id: 9,
            request: PipelineRequest {
                date: "1988-02-04".into(),
                time: "16:30".into(),
                location: ResolvedLocation {
                    city: "Helsinki".into(),
                    country: "Finland".into(),
                    timezone: "Europe/Helsinki".into(),
                },
                language: Language::Fi,
            },
        })
        .expect("worker alive");
        let out = tokio::time::timeout(Duration::from_secs(2), prx.recv())
            .await
            .ok()
            .flatten()
            .expect("pipeline answer");
        assert_eq!(out.id, 9);
        assert!(out.result.is_ok());
    }
}
