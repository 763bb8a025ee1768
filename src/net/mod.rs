//! Chart service client: the [`ChartApi`] seam, its HTTP implementation and wire types.

mod client;
mod error;
#[cfg(test)]
pub mod fake;
pub mod payloads;

pub use client::{
    CHART_PATH, ChartApi, HIDDEN_STEMS_PATH, HttpChartApi, PILLARS_PATH, SEARCH_PATH,
    chart_payload_from,
};
pub use error::ServiceError;
pub use payloads::{
    ChartRenderRequest, ChartResponse, HiddenStemsRequest, PillarsRequest, PillarsResponse,
    SearchRequest,
};
