//! Core non-UI logic: the chart pipeline and query dispatch.

pub mod pipeline;
pub mod query;

pub use pipeline::{
    ChartOutcome, ChartPipeline, EnrichmentOutcome, PipelineError, PipelineOutcome,
    PipelineRequest,
};
pub use query::send_query;
