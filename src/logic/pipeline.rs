//! Staged chart generation: pillars, then chart, then a detached hidden-stems enrichment.

use std::sync::Arc;

use thiserror::Error;

use crate::i18n::Language;
use crate::net::{ChartApi, ChartRenderRequest, HiddenStemsRequest, PillarsRequest, ServiceError};
use crate::state::{
    ChartPayload, HiddenStemsMap, PillarSet, ResolvedLocation, ServiceLocation, StatusText,
};

/// Separator between the chart header and the resolved city.
pub const HEADER_SEPARATOR: &str = " · ";

/// Failure of a pipeline run, tagged with the step that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The pillars step failed; the chart step never ran.
    #[error("pillars step failed: {0}")]
    Pillars(ServiceError),
    /// The chart step failed.
    #[error("chart step failed: {0}")]
    Chart(ServiceError),
}

impl PipelineError {
    /// What: One user-facing message for the failure.
    ///
    /// Output:
    /// - Service detail verbatim when present
    /// - `chart_create_error` for transport failures
    /// - Otherwise the step fallback: `pillars_error` or `chart_error`
    #[must_use]
    pub fn status_text(&self) -> StatusText {
        let (err, fallback) = match self {
            Self::Pillars(e) => (e, "pillars_error"),
            Self::Chart(e) => (e, "chart_error"),
        };
        if let Some(detail) = err.detail() {
            return StatusText::Literal(detail.to_string());
        }
        if err.is_transport() {
            return StatusText::key("chart_create_error");
        }
        StatusText::key(fallback)
    }
}

/// Validated input of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    /// Committed location.
    pub location: ResolvedLocation,
    /// Language the chart text is rendered in.
    pub language: Language,
}

/// Successful run: the chart to show plus the enrichment request to fire afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartOutcome {
    /// Chart with the final header.
    pub chart: ChartPayload,
    /// Pillar codes for the hidden-stems call.
    pub enrichment: HiddenStemsRequest,
}

/// Pipeline result tagged with its submission id.
#[derive(Clone, Debug)]
pub struct PipelineOutcome {
    /// Submission id.
    pub id: u64,
    /// Run result.
    pub result: Result<ChartOutcome, PipelineError>,
}

/// Enrichment data for the chart with id `chart_id`.
#[derive(Clone, Debug)]
pub struct EnrichmentOutcome {
    /// Chart the data belongs to.
    pub chart_id: u64,
    /// Hidden stems per pillar.
    pub data: HiddenStemsMap,
}

/// Runs the service calls behind chart generation.
#[derive(Clone)]
pub struct ChartPipeline {
    /// Service client.
    api: Arc<dyn ChartApi>,
}

impl ChartPipeline {
    /// Pipeline over `api`.
    #[must_use]
    pub fn new(api: Arc<dyn ChartApi>) -> Self {
        Self { api }
    }

    /// What: Run the pillars and chart steps in order.
    ///
    /// Inputs:
    /// - `req`: Validated date, time, location and language
    ///
    /// Output:
    /// - `Ok(ChartOutcome)` ready to display, or the failing step
    ///
    /// # Errors
    /// - `PipelineError::Pillars` when the pillars call fails; the chart call is skipped
    /// - `PipelineError::Chart` when the chart call fails or reports `error`
    pub async fn run(&self, req: &PipelineRequest) -> Result<ChartOutcome, PipelineError> {
        tracing::info!(date = %req.date, time = %req.time, city = %req.location.city, "pillars step");
        let pillars = self
            .api
            .four_pillars(&pillars_request(req))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "pillars step failed");
                PipelineError::Pillars(e)
            })?;

        tracing::info!(lang = %req.language, "chart step");
        let chart_req = chart_request(&pillars.four_pillars, req);
        let mut chart = self.api.render_chart(&chart_req).await.map_err(|e| {
            tracing::warn!(error = %e, "chart step failed");
            PipelineError::Chart(e)
        })?;

        chart.header = augment_header(&chart.header, pillars.resolved_location.as_ref());
        Ok(ChartOutcome {
            chart,
            enrichment: hidden_stems_request(&pillars.four_pillars),
        })
    }

    /// What: Fetch hidden stems for a displayed chart.
    ///
    /// Inputs:
    /// - `req`: Pillar codes
    ///
    /// Output:
    /// - `Some(map)` on success; `None` after logging any failure
    pub async fn enrich(&self, req: &HiddenStemsRequest) -> Option<HiddenStemsMap> {
        match self.api.hidden_stems(req).await {
            Ok(map) => Some(map),
            Err(e) => {
                tracing::warn!(error = %e, "hidden stems enrichment failed");
                None
            }
        }
    }
}

/// Body of the pillars call.
#[must_use]
pub fn pillars_request(req: &PipelineRequest) -> PillarsRequest {
    PillarsRequest {
        date: req.date.clone(),
        time: req.time.clone(),
        city: req.location.service_city(),
    }
}

/// Body of the chart call, built from the pillars answer only.
#[must_use]
pub fn chart_request(p: &PillarSet, req: &PipelineRequest) -> ChartRenderRequest {
    ChartRenderRequest {
        date: req.date.clone(),
        time: req.time.clone(),
        hour_stem: p.hour.stem.chinese.clone(),
        hour_branch: p.hour.branch.chinese.clone(),
        day_stem: p.day.stem.chinese.clone(),
        day_branch: p.day.branch.chinese.clone(),
        month_stem: p.month.stem.chinese.clone(),
        month_branch: p.month.branch.chinese.clone(),
        year_stem: p.year.stem.chinese.clone(),
        year_branch: p.year.branch.chinese.clone(),
        lang: req.language.code().to_string(),
    }
}

/// Body of the enrichment call.
#[must_use]
pub fn hidden_stems_request(p: &PillarSet) -> HiddenStemsRequest {
    HiddenStemsRequest {
        year_pillar: p.year.code(),
        month_pillar: p.month.code(),
        day_pillar: p.day.code(),
        hour_pillar: p.hour.code(),
    }
}

/// Append the geocoded city to the header when the service reported one.
#[must_use]
pub fn augment_header(header: &str, resolved: Option<&ServiceLocation>) -> String {
    match resolved {
        Some(loc) if !loc.city.trim().is_empty() => {
            format!("{header}{HEADER_SEPARATOR}{}", loc.city)
        }
        _ => header.to_string(),
    }
}
