//! Background workers: each receives requests on one channel and answers on another.

mod chart;
mod events;
mod search;

pub use chart::{spawn_chart_worker, spawn_enrichment_worker};
pub use events::spawn_event_thread;
pub use search::spawn_search_worker;
