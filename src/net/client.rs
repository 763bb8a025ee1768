//! HTTP implementation of the chart service client.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ServiceError;
use super::payloads::{
    ChartRenderRequest, ChartResponse, ErrorBody, HiddenStemsRequest, HiddenStemsResponse,
    PillarsRequest, PillarsResponse, SearchRequest, SearchResponse,
};
use crate::state::{ChartPayload, HiddenStemsMap, LocationSuggestion};

/// Path of the location suggestion endpoint.
pub const SEARCH_PATH: &str = "/api/location_suggest";
/// Path of the four pillars endpoint.
pub const PILLARS_PATH: &str = "/api/four_pillars";
/// Path of the chart rendering endpoint.
pub const CHART_PATH: &str = "/api/chart";
/// Path of the hidden stems endpoint.
pub const HIDDEN_STEMS_PATH: &str = "/api/hidden_stems";

/// The four calls the client makes against the chart service.
///
/// Implementations must be cheap to share across tasks; the runtime holds one behind an
/// `Arc` and calls it from spawned workers.
#[async_trait]
pub trait ChartApi: Send + Sync {
    /// Look up location candidates for a free-text query.
    async fn search(&self, req: &SearchRequest) -> Result<Vec<LocationSuggestion>, ServiceError>;

    /// Compute the four pillars for a date, time and city.
    async fn four_pillars(&self, req: &PillarsRequest) -> Result<PillarsResponse, ServiceError>;

    /// Render chart display data from the eight glyphs.
    ///
    /// A 2xx body carrying `error` must be reported as [`ServiceError::Service`].
    async fn render_chart(&self, req: &ChartRenderRequest) -> Result<ChartPayload, ServiceError>;

    /// Fetch hidden stems for the four pillar codes.
    async fn hidden_stems(&self, req: &HiddenStemsRequest) -> Result<HiddenStemsMap, ServiceError>;
}

/// `reqwest`-backed [`ChartApi`] talking JSON over HTTP POST.
#[derive(Clone, Debug)]
pub struct HttpChartApi {
    /// Pooled HTTP client.
    client: reqwest::Client,
    /// Service root without trailing slash.
    base_url: String,
}

impl HttpChartApi {
    /// What: Build a client for the service at `base_url`.
    ///
    /// Inputs:
    /// - `base_url`: Service root, e.g. `http://127.0.0.1:8000`
    ///
    /// Output:
    /// - Client ready for use
    ///
    /// Details:
    /// - No request timeout is configured; calls are superseded, never aborted
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("eightchars/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to build configured HTTP client, using defaults");
                reqwest::Client::new()
            });
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Service root this client posts to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// What: POST `body` as JSON to `path` and decode the JSON answer.
    ///
    /// Inputs:
    /// - `path`: Endpoint path starting with `/`
    /// - `body`: Request payload
    ///
    /// Output:
    /// - Decoded success body, or a classified [`ServiceError`]
    ///
    /// Details:
    /// - Connection failures and undecodable success bodies are `Transport`
    /// - Non-2xx statuses are `Service`, with `detail`/`error` text when the body has one
    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + Sync + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(url = %url, "POST");
        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(ErrorBody::message);
            tracing::debug!(url = %url, status = status.as_u16(), detail = ?detail, "service error");
            return Err(ServiceError::Service {
                status: status.as_u16(),
                detail,
            });
        }
        serde_json::from_str(&text).map_err(|e| {
            ServiceError::Transport(format!("malformed JSON from {path}: {e}"))
        })
    }
}

#[async_trait]
impl ChartApi for HttpChartApi {
    async fn search(&self, req: &SearchRequest) -> Result<Vec<LocationSuggestion>, ServiceError> {
        let resp: SearchResponse = self.post_json(SEARCH_PATH, req).await?;
        Ok(resp.suggestions)
    }

    async fn four_pillars(&self, req: &PillarsRequest) -> Result<PillarsResponse, ServiceError> {
        self.post_json(PILLARS_PATH, req).await
    }

    async fn render_chart(&self, req: &ChartRenderRequest) -> Result<ChartPayload, ServiceError> {
        let resp: ChartResponse = self.post_json(CHART_PATH, req).await?;
        chart_payload_from(resp)
    }

    async fn hidden_stems(&self, req: &HiddenStemsRequest) -> Result<HiddenStemsMap, ServiceError> {
        let resp: HiddenStemsResponse = self.post_json(HIDDEN_STEMS_PATH, req).await?;
        resp.hidden_stems.ok_or_else(|| ServiceError::Service {
            status: 200,
            detail: Some("response carried no hidden_stems".to_string()),
        })
    }
}

/// What: Turn a 2xx chart body into a payload, honouring an embedded `error`.
///
/// Inputs:
/// - `resp`: Decoded chart body
///
/// Output:
/// - `Ok(ChartPayload)`, or `Err(Service{status: 200, ..})` when `error` carries text
///
/// # Errors
/// - Returns `Err` when the body carries a non-empty `error` field; an empty one is ignored
pub fn chart_payload_from(mut resp: ChartResponse) -> Result<ChartPayload, ServiceError> {
    if let Some(error) = resp.error.take().filter(|e| !e.is_empty()) {
        return Err(ServiceError::Service {
            status: 200,
            detail: Some(error),
        });
    }
    Ok(resp.into())
}
