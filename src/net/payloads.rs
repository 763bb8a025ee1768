//! Request and response bodies of the four service endpoints.

use serde::{Deserialize, Serialize};

use crate::state::{
    ChartPayload, ChartPillar, HiddenStemsMap, LocationSuggestion, PillarSet, ServiceLocation,
};

/// `POST /api/location_suggest` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Trimmed free-text query.
    pub query: String,
    /// Maximum number of suggestions wanted.
    pub limit: u32,
}

/// `POST /api/location_suggest` success body.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// Suggestions in relevance order.
    pub suggestions: Vec<LocationSuggestion>,
}

/// `POST /api/four_pillars` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PillarsRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    /// `"<city>, <country>"`.
    pub city: String,
}

/// `POST /api/four_pillars` success body.
#[derive(Clone, Debug, Deserialize)]
pub struct PillarsResponse {
    /// The computed pillars.
    pub four_pillars: PillarSet,
    /// Location the service geocoded the city to, when it reports one.
    #[serde(default)]
    pub resolved_location: Option<ServiceLocation>,
}

/// `POST /api/chart` body: the eight glyphs plus display language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartRenderRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    /// Hour stem glyph.
    pub hour_stem: String,
    /// Hour branch glyph.
    pub hour_branch: String,
    /// Day stem glyph.
    pub day_stem: String,
    /// Day branch glyph.
    pub day_branch: String,
    /// Month stem glyph.
    pub month_stem: String,
    /// Month branch glyph.
    pub month_branch: String,
    /// Year stem glyph.
    pub year_stem: String,
    /// Year branch glyph.
    pub year_branch: String,
    /// `fi` or `en`.
    pub lang: String,
}

/// `POST /api/chart` body as received; `error` may be set even on a 2xx status.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChartResponse {
    /// Header line.
    pub header: String,
    /// Pillars in display order.
    pub pillars: Vec<ChartPillar>,
    /// Payload-level failure reported by the service.
    pub error: Option<String>,
}

impl From<ChartResponse> for ChartPayload {
    fn from(r: ChartResponse) -> Self {
        Self {
            header: r.header,
            pillars: r.pillars,
        }
    }
}

/// `POST /api/hidden_stems` body: two-glyph codes per pillar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HiddenStemsRequest {
    /// Year stem+branch.
    pub year_pillar: String,
    /// Month stem+branch.
    pub month_pillar: String,
    /// Day stem+branch.
    pub day_pillar: String,
    /// Hour stem+branch.
    pub hour_pillar: String,
}

/// `POST /api/hidden_stems` success body.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct HiddenStemsResponse {
    /// Per-pillar hidden stems; absent when the service had nothing to say.
    pub hidden_stems: Option<HiddenStemsMap>,
}

/// Error fields a failing response may carry.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    /// FastAPI style `detail` text.
    pub detail: Option<serde_json::Value>,
    /// Payload-level `error` text.
    pub error: Option<String>,
}

impl ErrorBody {
    /// What: Extract the most specific message from an error body.
    ///
    /// Output:
    /// - `detail` when it is a string; `error` otherwise; `None` when neither is usable
    ///
    /// Details:
    /// - Validation errors carry `detail` as a list of objects; those have no single
    ///   user-facing sentence and are treated as "no message"
    #[must_use]
    pub fn message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => self.error.filter(|e| !e.trim().is_empty()),
        }
    }
}
