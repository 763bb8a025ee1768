//! Scripted [`ChartApi`] used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{
    ChartApi, ChartRenderRequest, HiddenStemsRequest, PillarsRequest, PillarsResponse,
    SearchRequest, ServiceError,
};
use crate::state::{
    ChartPayload, ChartPillar, Glyph, HiddenStemsMap, LocationSuggestion, Pillar, PillarSet,
};

/// A canned answer plus an artificial latency.
#[derive(Clone, Debug)]
pub struct Scripted<T> {
    /// Value returned after the delay.
    pub result: Result<T, ServiceError>,
    /// Latency before answering.
    pub delay: Duration,
}

impl<T> Scripted<T> {
    /// Answer immediately.
    pub const fn now(result: Result<T, ServiceError>) -> Self {
        Self {
            result,
            delay: Duration::ZERO,
        }
    }

    /// Answer after `ms` milliseconds.
    pub const fn after(ms: u64, result: Result<T, ServiceError>) -> Self {
        Self {
            result,
            delay: Duration::from_millis(ms),
        }
    }
}

/// In-memory service that records every call it receives.
#[derive(Debug)]
pub struct ScriptedApi {
    /// Answers keyed by search query; unknown queries get an empty list.
    pub search: HashMap<String, Scripted<Vec<LocationSuggestion>>>,
    /// Answer of the pillars step.
    pub pillars: Scripted<PillarsResponse>,
    /// Answer of the chart step.
    pub chart: Scripted<ChartPayload>,
    /// Answer of the enrichment call.
    pub hidden: Scripted<HiddenStemsMap>,
    /// Endpoint paths in call order.
    pub(crate) calls: Mutex<Vec<String>>,
    /// Chart requests as received.
    pub(crate) chart_requests: Mutex<Vec<ChartRenderRequest>>,
    /// Pillars requests as received.
    pub(crate) pillars_requests: Mutex<Vec<PillarsRequest>>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            search: HashMap::new(),
            pillars: Scripted::now(Ok(sample_pillars())),
            chart: Scripted::now(Ok(sample_chart())),
            hidden: Scripted::now(Ok(HiddenStemsMap::default())),
            calls: Mutex::new(Vec::new()),
            chart_requests: Mutex::new(Vec::new()),
            pillars_requests: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedApi {
    /// Endpoint paths called so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls made to `path`.
    pub fn count(&self, path: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == path).count()
    }

    /// Chart requests received so far.
    pub fn chart_requests(&self) -> Vec<ChartRenderRequest> {
        self.chart_requests
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Pillars requests received so far.
    pub fn pillars_requests(&self) -> Vec<PillarsRequest> {
        self.pillars_requests
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn record(&self, path: &str) {
        if let Ok(mut c) = self.calls.lock() {
            c.push(path.to_string());
        }
    }
}

async fn answer<T: Clone>(s: &Scripted<T>) -> Result<T, ServiceError> {
    if !s.delay.is_zero() {
        tokio::time::sleep(s.delay).await;
    }
    s.result.clone()
}

#[async_trait]
impl ChartApi for ScriptedApi {
    async fn search(&self, req: &SearchRequest) -> Result<Vec<LocationSuggestion>, ServiceError> {
        self.record(super::SEARCH_PATH);
        match self.search.get(&req.query) {
            Some(s) => answer(s).await,
            None => Ok(Vec::new()),
        }
    }

    async fn four_pillars(&self, req: &PillarsRequest) -> Result<PillarsResponse, ServiceError> {
        self.record(super::PILLARS_PATH);
        if let Ok(mut r) = self.pillars_requests.lock() {
            r.push(req.clone());
        }
        answer(&self.pillars).await
    }

    async fn render_chart(&self, req: &ChartRenderRequest) -> Result<ChartPayload, ServiceError> {
        self.record(super::CHART_PATH);
        if let Ok(mut r) = self.chart_requests.lock() {
            r.push(req.clone());
        }
        answer(&self.chart).await
    }

    async fn hidden_stems(&self, _req: &HiddenStemsRequest) -> Result<HiddenStemsMap, ServiceError> {
        self.record(super::HIDDEN_STEMS_PATH);
        answer(&self.hidden).await
    }
}

/// A Helsinki suggestion as the search service returns it.
pub fn helsinki() -> LocationSuggestion {
    LocationSuggestion {
        display: "Helsinki, Finland".into(),
        city: "Helsinki".into(),
        country: "Finland".into(),
        timezone: "Europe/Helsinki".into(),
    }
}

/// Suggestion with the given city and country, timezone left generic.
pub fn place(city: &str, country: &str) -> LocationSuggestion {
    LocationSuggestion {
        display: format!("{city}, {country}"),
        city: city.into(),
        country: country.into(),
        timezone: "UTC".into(),
    }
}

fn glyphs(stem: &str, branch: &str) -> Pillar {
    Pillar {
        stem: Glyph {
            chinese: stem.into(),
            ..Glyph::default()
        },
        branch: Glyph {
            chinese: branch.into(),
            ..Glyph::default()
        },
    }
}

/// Pillars for 1988-02-04 16:30 in Helsinki.
pub fn sample_pillars() -> PillarsResponse {
    PillarsResponse {
        four_pillars: PillarSet {
            hour: glyphs("壬", "申"),
            day: glyphs("己", "丑"),
            month: glyphs("癸", "丑"),
            year: glyphs("丁", "卯"),
        },
        resolved_location: None,
    }
}

/// A four-column chart with the given header.
pub fn chart_with_header(header: &str) -> ChartPayload {
    let labels = ["Hour", "Day", "Month", "Year"];
    ChartPayload {
        header: header.into(),
        pillars: labels
            .iter()
            .map(|l| ChartPillar {
                label: (*l).to_string(),
                ..ChartPillar::default()
            })
            .collect(),
    }
}

/// Chart body matching [`sample_pillars`].
pub fn sample_chart() -> ChartPayload {
    chart_with_header("February 4, 1988 · 16:30")
}
