//! Rendered chart and its per-branch hidden-stem panels.

use super::types::{ChartPayload, ChartPillar, HiddenStem, HiddenStemsMap, PillarKey};

/// Expansion state of a detail panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Zero height.
    #[default]
    Collapsed,
    /// Natural content height.
    Expanded,
}

/// Hidden stems shown under one branch card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailPanel {
    /// Hidden stems, strongest first; empty until enrichment arrives.
    entries: Vec<HiddenStem>,
    /// Current expansion.
    state: PanelState,
}

impl DetailPanel {
    /// Hidden stems held by the panel.
    #[must_use]
    pub fn entries(&self) -> &[HiddenStem] {
        &self.entries
    }

    /// `true` once enrichment delivered at least one stem.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Current expansion.
    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.state
    }

    /// Rows the panel occupies: one per stem when expanded, zero otherwise.
    #[must_use]
    pub fn height(&self) -> u16 {
        match self.state {
            PanelState::Collapsed => 0,
            PanelState::Expanded => u16::try_from(self.entries.len()).unwrap_or(u16::MAX),
        }
    }
}

/// Result of activating a branch card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Panel expanded.
    Opened,
    /// Panel collapsed.
    Closed,
    /// Panel has no data; nothing changed.
    Inert,
}

/// The chart currently displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartView {
    /// Submission id that produced this chart; enrichment is matched against it.
    id: u64,
    /// Header line, already augmented with the resolved city.
    header: String,
    /// Columns in display order.
    pillars: Vec<ChartPillar>,
    /// One panel per pillar, indexed by [`PillarKey::index`].
    panels: [DetailPanel; 4],
    /// Column holding keyboard focus.
    focused: PillarKey,
}

impl ChartView {
    /// What: Build the view for a successful pipeline run.
    ///
    /// Inputs:
    /// - `id`: Submission id
    /// - `payload`: Chart body with the final header
    #[must_use]
    pub fn new(id: u64, payload: ChartPayload) -> Self {
        Self {
            id,
            header: payload.header,
            pillars: payload.pillars,
            panels: Default::default(),
            focused: PillarKey::Hour,
        }
    }

    /// Submission id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Header line.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Columns in display order.
    #[must_use]
    pub fn pillars(&self) -> &[ChartPillar] {
        &self.pillars
    }

    /// Panel under the branch card of `key`.
    #[must_use]
    pub const fn panel(&self, key: PillarKey) -> &DetailPanel {
        &self.panels[key.index()]
    }

    /// Height of the panel under `key`.
    #[must_use]
    pub fn panel_height(&self, key: PillarKey) -> u16 {
        self.panel(key).height()
    }

    /// Column holding keyboard focus.
    #[must_use]
    pub const fn focused(&self) -> PillarKey {
        self.focused
    }

    /// Move focus one column right, wrapping.
    pub fn focus_next(&mut self) {
        let i = (self.focused.index() + 1) % PillarKey::ALL.len();
        self.focused = PillarKey::ALL[i];
    }

    /// Move focus one column left, wrapping.
    pub fn focus_prev(&mut self) {
        let n = PillarKey::ALL.len();
        let i = (self.focused.index() + n - 1) % n;
        self.focused = PillarKey::ALL[i];
    }

    /// Put focus on `key`.
    pub const fn focus(&mut self, key: PillarKey) {
        self.focused = key;
    }

    /// What: Fill panels from an enrichment answer.
    ///
    /// Inputs:
    /// - `map`: Hidden stems per pillar
    ///
    /// Details:
    /// - Pillars missing from the answer keep their current content
    /// - Expansion state is preserved
    pub fn merge_hidden_stems(&mut self, map: &HiddenStemsMap) {
        for key in PillarKey::ALL {
            if let Some(stems) = map.get(key) {
                self.panels[key.index()].entries = stems.hidden_stems.clone();
            }
        }
    }

    /// What: Toggle the panel under `key`.
    ///
    /// Output:
    /// - `Opened`/`Closed`, or `Inert` when the panel has no data
    pub fn toggle_panel(&mut self, key: PillarKey) -> ToggleOutcome {
        let panel = &mut self.panels[key.index()];
        if !panel.has_content() {
            return ToggleOutcome::Inert;
        }
        match panel.state {
            PanelState::Collapsed => {
                panel.state = PanelState::Expanded;
                ToggleOutcome::Opened
            }
            PanelState::Expanded => {
                panel.state = PanelState::Collapsed;
                ToggleOutcome::Closed
            }
        }
    }

    /// Toggle the panel of the focused column.
    pub fn toggle_focused(&mut self) -> ToggleOutcome {
        self.toggle_panel(self.focused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::PillarHiddenStems;

    fn view() -> ChartView {
        ChartView::new(
            7,
            ChartPayload {
                header: "February 4, 1988 · 16:30".into(),
                pillars: vec![ChartPillar::default(); 4],
            },
        )
    }

    #[test]
    /// What: Panels are inert until data arrives, then toggle between zero and content height.
    ///
    /// Inputs:
    /// - Fresh view; enrichment with two year stems
    ///
    /// Output:
    /// - `Inert` before merge; `Opened` with height 2 then `Closed` with height 0 after
    fn panels_toggle_only_with_content() {
        let mut v = view();
        assert_eq!(v.toggle_panel(PillarKey::Year), ToggleOutcome::Inert);
        assert_eq!(v.panel_height(PillarKey::Year), 0);

        v.merge_hidden_stems(&HiddenStemsMap {
            year: Some(PillarHiddenStems {
                hidden_stems: vec![HiddenStem::Glyph("乙".into()), HiddenStem::Glyph("癸".into())],
            }),
            ..HiddenStemsMap::default()
        });
        assert_eq!(v.toggle_panel(PillarKey::Year), ToggleOutcome::Opened);
        assert_eq!(v.panel_height(PillarKey::Year), 2);
        assert_eq!(v.toggle_panel(PillarKey::Year), ToggleOutcome::Closed);
        assert_eq!(v.panel_height(PillarKey::Year), 0);
        assert_eq!(v.toggle_panel(PillarKey::Hour), ToggleOutcome::Inert);
    }

    #[test]
    fn focus_wraps_across_columns() {
        let mut v = view();
        assert_eq!(v.focused(), PillarKey::Hour);
        v.focus_prev();
        assert_eq!(v.focused(), PillarKey::Year);
        v.focus_next();
        v.focus_next();
        assert_eq!(v.focused(), PillarKey::Day);
        v.focus(PillarKey::Month);
        assert_eq!(v.toggle_focused(), ToggleOutcome::Inert);
    }
}
