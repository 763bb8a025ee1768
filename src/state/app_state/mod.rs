//! Central `AppState` container owned by the event loop.

use ratatui::layout::Rect;

use crate::i18n::{Language, TextProvider};
use crate::logic::{ChartOutcome, PipelineError, PipelineRequest};
use crate::net::HiddenStemsRequest;
use crate::state::chart::ChartView;
use crate::state::combobox::{LocationResolver, QueryInput};
use crate::state::form::FormState;
use crate::state::status::{StatusMessage, StatusText};
use crate::state::types::HiddenStemsMap;


/// Which screen is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// Date, time and location form.
    #[default]
    Input,
    /// Rendered chart.
    Chart,
}

/// A submission that passed its preconditions and should be run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitJob {
    /// Submission id.
    pub id: u64,
    /// Pipeline input.
    pub request: PipelineRequest,
}

/// Enrichment to fire once a chart is on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnrichmentJob {
    /// Chart the answer belongs to.
    pub chart_id: u64,
    /// Pillar codes.
    pub request: HiddenStemsRequest,
}

/// Clickable regions recorded by the last frame, in terminal cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitRects {
    /// Date field.
    pub date: Option<Rect>,
    /// Time field.
    pub time: Option<Rect>,
    /// Location field plus its open list.
    pub combobox: Option<Rect>,
    /// Location field alone.
    pub location: Option<Rect>,
    /// One rect per visible suggestion row, paired with its list index.
    pub suggestion_rows: Vec<(usize, Rect)>,
    /// Submit button.
    pub submit: Option<Rect>,
    /// `FI` language button.
    pub lang_fi: Option<Rect>,
    /// `EN` language button.
    pub lang_en: Option<Rect>,
    /// Branch card per pillar column, in display order.
    pub branch_cards: [Option<Rect>; 4],
    /// Back button on the chart view.
    pub back: Option<Rect>,
}

/// Global application state mutated only by event and channel handlers.
#[derive(Debug)]
pub struct AppState {
    /// Localized text and the active language.
    text: TextProvider,
    /// Location combobox.
    resolver: LocationResolver,
    /// Date/time fields and focus.
    pub form: FormState,
    /// Visible screen.
    view: View,
    /// Chart shown in `View::Chart`.
    chart: Option<ChartView>,
    /// Next submission id to hand out.
    next_submission_id: u64,
    /// Submission whose outcome is awaited.
    latest_submission_id: u64,
    /// `true` between a dispatched submission and its outcome.
    in_flight: bool,
    /// Regions recorded by the renderer for mouse hit-testing.
    pub hits: HitRects,
    /// Set when the user asked to quit.
    pub should_quit: bool,
}

impl AppState {
    /// What: Fresh state on the input view.
    ///
    /// Inputs:
    /// - `text`: Text provider with the resolved start-up language
    #[must_use]
    pub fn new(text: TextProvider) -> Self {
        Self {
            text,
            resolver: LocationResolver::default(),
            form: FormState::default(),
            view: View::Input,
            chart: None,
            next_submission_id: 0,
            latest_submission_id: 0,
            in_flight: false,
            hits: HitRects::default(),
            should_quit: false,
        }
    }

    /// Text provider.
    #[must_use]
    pub const fn text(&self) -> &TextProvider {
        &self.text
    }

    /// Active language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.text.language()
    }

    /// Location combobox.
    #[must_use]
    pub const fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    /// Location combobox, for edits and navigation.
    pub const fn resolver_mut(&mut self) -> &mut LocationResolver {
        &mut self.resolver
    }

    /// Visible screen.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Chart on screen, if any.
    #[must_use]
    pub const fn chart(&self) -> Option<&ChartView> {
        self.chart.as_ref()
    }

    /// Chart on screen, for panel toggles and focus.
    pub const fn chart_mut(&mut self) -> Option<&mut ChartView> {
        self.chart.as_mut()
    }

    /// `true` while a submission awaits its outcome.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// `true` when the submit button should be enabled.
    #[must_use]
    pub const fn submit_enabled(&self) -> bool {
        self.resolver.resolved_for_submit().is_some() && !self.in_flight
    }

    /// Status line rendered in the active language.
    #[must_use]
    pub fn status_line(&self) -> Option<(String, crate::state::StatusTone)> {
        self.resolver
            .status()
            .map(|s| (s.render(&self.text), s.tone))
    }

    fn reject(&mut self, key: &'static str) {
        tracing::info!(reason = key, "submission rejected");
        self.resolver
            .set_status(StatusMessage::error(StatusText::key(key)));
    }

    /// What: Check submit preconditions and start a submission.
    ///
    /// Output:
    /// - `Some(SubmitJob)` to run, or `None` after setting the status line
    ///
    /// Details:
    /// - Rejected while another submission is in flight (`chart_in_flight`)
    /// - Rejected without a committed location (`need_location`)
    /// - Rejected on a bad date or time (`invalid_date` / `invalid_time`)
    pub fn begin_submission(&mut self) -> Option<SubmitJob> {
        if self.in_flight {
            self.reject("chart_in_flight");
            return None;
        }
        let Some(location) = self.resolver.resolved_for_submit().cloned() else {
            self.reject("need_location");
            return None;
        };
        let moment = match self.form.validated() {
            Ok(m) => m,
            Err(key) => {
                self.reject(key);
                return None;
            }
        };
        self.next_submission_id += 1;
        self.latest_submission_id = self.next_submission_id;
        self.in_flight = true;
        tracing::info!(id = self.latest_submission_id, city = %location.city, "submission started");
        Some(SubmitJob {
            id: self.latest_submission_id,
            request: PipelineRequest {
                date: moment.date,
                time: moment.time,
                location,
                language: self.text.language(),
            },
        })
    }

    /// What: Apply the result of a pipeline run.
    ///
    /// Inputs:
    /// - `id`: Submission id the result belongs to
    /// - `result`: Pipeline result
    ///
    /// Output:
    /// - `Some(EnrichmentJob)` when a chart was shown and should be enriched
    ///
    /// Details:
    /// - Results for superseded submissions are dropped
    /// - Failure keeps the input view and shows one status message
    pub fn apply_pipeline_outcome(
        &mut self,
        id: u64,
        result: Result<ChartOutcome, PipelineError>,
    ) -> Option<EnrichmentJob> {
        if id != self.latest_submission_id || !self.in_flight {
            tracing::debug!(id, latest = self.latest_submission_id, "dropping superseded chart");
            return None;
        }
        self.in_flight = false;
        match result {
            Ok(outcome) => {
                self.chart = Some(ChartView::new(id, outcome.chart));
                self.view = View::Chart;
                Some(EnrichmentJob {
                    chart_id: id,
                    request: outcome.enrichment,
                })
            }
            Err(err) => {
                self.resolver
                    .set_status(StatusMessage::error(err.status_text()));
                None
            }
        }
    }

    /// What: Merge hidden stems into the chart they were fetched for.
    ///
    /// Output:
    /// - `true` when a chart with `chart_id` is on screen and received the data
    pub fn apply_enrichment(&mut self, chart_id: u64, data: &HiddenStemsMap) -> bool {
        match self.chart.as_mut() {
            Some(chart) if chart.id() == chart_id => {
                chart.merge_hidden_stems(data);
                true
            }
            _ => {
                tracing::debug!(chart_id, "dropping enrichment for discarded chart");
                false
            }
        }
    }

    /// What: Leave the chart view.
    ///
    /// Output:
    /// - Cancel marker for the debounce worker
    ///
    /// Details:
    /// - Discards the chart, shows the input view and resets the combobox
    /// - Any outstanding submission is invalidated
    pub fn back(&mut self) -> QueryInput {
        self.chart = None;
        self.view = View::Input;
        self.in_flight = false;
        self.next_submission_id += 1;
        self.latest_submission_id = self.next_submission_id;
        self.resolver.reset()
    }

    /// Switch to `language` and persist the choice.
    pub fn set_language(&mut self, language: Language) -> Language {
        self.text.set_language(language.code())
    }

    /// Flip between the two languages.
    pub fn toggle_language(&mut self) -> Language {
        let next = self.text.language().toggled();
        self.set_language(next)
    }
}
