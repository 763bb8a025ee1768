//! Application state: the combobox, the chart view, the form and the `AppState` container.

pub mod app_state;
pub mod chart;
pub mod combobox;
pub mod form;
pub mod status;
pub mod suggestions;
pub mod types;

pub use app_state::{AppState, EnrichmentJob, HitRects, SubmitJob, View};
pub use chart::{ChartView, DetailPanel, PanelState, ToggleOutcome};
pub use combobox::{
    ComboState, LocationResolver, NavOutcome, QueryInput, SearchApply, SearchOutcome,
};
pub use form::{BirthMoment, FormField, FormState};
pub use status::{StatusMessage, StatusText, StatusTone};
pub use suggestions::SuggestionStore;
pub use types::{
    BranchCard, ChartPayload, ChartPillar, Glyph, HiddenStem, HiddenStemsMap, LocationSuggestion,
    Pillar, PillarHiddenStems, PillarKey, PillarSet, ResolvedLocation, ServiceLocation, StemCard,
};
