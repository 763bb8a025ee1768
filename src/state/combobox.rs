//! Location combobox: free-text query, race-safe suggestions and a lockable resolution.

use super::status::{StatusMessage, StatusText, StatusTone};
use super::suggestions::SuggestionStore;
use super::types::{LocationSuggestion, ResolvedLocation};
use crate::net::ServiceError;

/// A query handed to the debounce worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryInput {
    /// Generation the query belongs to.
    pub id: u64,
    /// Trimmed query text; empty when the query cancels a pending search.
    pub text: String,
}

impl QueryInput {
    /// A query that withdraws whatever search is still waiting in the debounce window.
    #[must_use]
    pub const fn cancel(id: u64) -> Self {
        Self {
            id,
            text: String::new(),
        }
    }

    /// `true` when this query carries no text and only cancels.
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        self.text.is_empty()
    }
}

/// A search answer tagged with the generation that asked for it.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Generation of the originating query.
    pub id: u64,
    /// Service answer.
    pub result: Result<Vec<LocationSuggestion>, ServiceError>,
}

/// Combobox lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ComboState {
    /// Nothing to show: blank query, dismissed list, or failed search.
    #[default]
    Empty,
    /// A query is waiting on the debounce window or the service.
    Searching,
    /// A suggestion list is open.
    Suggesting,
    /// A suggestion was committed; the field is locked.
    Resolved(ResolvedLocation),
}

/// Result of feeding a search answer to the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchApply {
    /// The answer belonged to the current generation and was shown.
    Applied,
    /// A newer query (or a state change) superseded the answer; it was dropped.
    Stale,
}

/// Result of a navigation key or a pointer pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// The cursor moved to the given row.
    Moved(usize),
    /// A suggestion was committed.
    Committed,
    /// The list was closed without a pick.
    Dismissed,
    /// No open list; nothing happened.
    Inactive,
}

/// Combobox controller owning the query text, the suggestions and the resolution.
///
/// Every edit bumps the generation counter, so answers to older queries are
/// recognised and dropped in [`LocationResolver::apply_search_result`].
#[derive(Clone, Debug, Default)]
pub struct LocationResolver {
    /// Text shown in the location field.
    input: String,
    /// Lifecycle state; `Resolved` carries the committed location.
    state: ComboState,
    /// Current suggestion list.
    store: SuggestionStore,
    /// Next generation id to hand out.
    next_query_id: u64,
    /// Generation of the newest query.
    latest_query_id: u64,
    /// Location status line.
    status: Option<StatusMessage>,
}

impl LocationResolver {
    /// Text in the location field.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &ComboState {
        &self.state
    }

    /// Suggestions currently held.
    #[must_use]
    pub const fn suggestions(&self) -> &SuggestionStore {
        &self.store
    }

    /// Location status message, if any.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Overwrite the status line (used for submit-time errors).
    pub(crate) fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    /// Generation of the newest query.
    #[must_use]
    pub const fn latest_query_id(&self) -> u64 {
        self.latest_query_id
    }

    /// `true` while a committed location locks the field.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self.state, ComboState::Resolved(_))
    }

    /// `true` when a non-empty list should be rendered.
    #[must_use]
    pub fn list_open(&self) -> bool {
        self.state == ComboState::Suggesting && !self.store.is_empty()
    }

    /// The committed location, which is the only way submit becomes possible.
    #[must_use]
    pub const fn resolved_for_submit(&self) -> Option<&ResolvedLocation> {
        match &self.state {
            ComboState::Resolved(loc) => Some(loc),
            _ => None,
        }
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_query_id += 1;
        self.latest_query_id = self.next_query_id;
        self.latest_query_id
    }

    /// What: Apply a new field value.
    ///
    /// Inputs:
    /// - `text`: Complete new content of the location field
    ///
    /// Output:
    /// - `QueryInput` to hand to the debounce worker; a blank query yields a cancel marker
    ///
    /// Details:
    /// - Always discards a held resolution and bumps the generation
    /// - A blank query clears suggestions and status and never reaches the service
    pub fn on_input(&mut self, text: String) -> Option<QueryInput> {
        self.input = text;
        let id = self.bump_generation();
        self.store.clear();
        let query = self.input.trim();
        if query.is_empty() {
            self.state = ComboState::Empty;
            self.status = None;
            return Some(QueryInput::cancel(id));
        }
        self.state = ComboState::Searching;
        self.status = Some(StatusMessage::neutral("searching"));
        Some(QueryInput {
            id,
            text: query.to_string(),
        })
    }

    /// Type one character; a locked field ignores typing.
    pub fn on_char(&mut self, c: char) -> Option<QueryInput> {
        if self.is_locked() {
            return None;
        }
        let mut text = std::mem::take(&mut self.input);
        text.push(c);
        self.on_input(text)
    }

    /// Delete the last character; on a locked field this unlocks it as an edit.
    pub fn on_backspace(&mut self) -> Option<QueryInput> {
        let mut text = std::mem::take(&mut self.input);
        text.pop();
        self.on_input(text)
    }

    /// What: Forward-delete at the caret.
    ///
    /// Output:
    /// - A query when the field was locked and got unlocked, otherwise `None`
    ///
    /// Details:
    /// - The caret sits at the end of the text, so an unlocked field has nothing to delete
    pub fn on_delete(&mut self) -> Option<QueryInput> {
        if !self.is_locked() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.on_input(text)
    }

    /// Clear the whole field (Ctrl+U).
    pub fn clear(&mut self) -> Option<QueryInput> {
        self.on_input(String::new())
    }

    /// What: Apply a search answer.
    ///
    /// Inputs:
    /// - `id`: Generation of the originating query
    /// - `result`: Service answer
    ///
    /// Output:
    /// - `Applied`, or `Stale` when a newer query or a state change superseded it
    ///
    /// Details:
    /// - Success opens the list with no cursor and shows `pick_city`, even for no hits
    /// - Failure empties the list and shows the service detail or `suggest_error`
    pub fn apply_search_result(
        &mut self,
        id: u64,
        result: Result<Vec<LocationSuggestion>, ServiceError>,
    ) -> SearchApply {
        if id != self.latest_query_id || self.state != ComboState::Searching {
            tracing::debug!(
                id,
                latest = self.latest_query_id,
                "dropping superseded search result"
            );
            return SearchApply::Stale;
        }
        match result {
            Ok(items) => {
                tracing::debug!(id, count = items.len(), "search results applied");
                self.store.replace(items);
                self.state = ComboState::Suggesting;
                self.status = Some(StatusMessage::neutral("pick_city"));
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "location search failed");
                self.store.clear();
                self.state = ComboState::Empty;
                let text = err.detail().map_or_else(
                    || StatusText::key("suggest_error"),
                    |d| StatusText::Literal(d.to_string()),
                );
                self.status = Some(StatusMessage::error(text));
            }
        }
        SearchApply::Applied
    }

    /// Move the highlight down, wrapping to the top.
    pub fn move_down(&mut self) -> NavOutcome {
        if !self.list_open() {
            return NavOutcome::Inactive;
        }
        self.store
            .move_down()
            .map_or(NavOutcome::Inactive, NavOutcome::Moved)
    }

    /// Move the highlight up, wrapping to the bottom.
    pub fn move_up(&mut self) -> NavOutcome {
        if !self.list_open() {
            return NavOutcome::Inactive;
        }
        self.store
            .move_up()
            .map_or(NavOutcome::Inactive, NavOutcome::Moved)
    }

    /// Commit the highlighted suggestion, or the first one when nothing is highlighted.
    pub fn enter(&mut self) -> NavOutcome {
        if !self.list_open() {
            return NavOutcome::Inactive;
        }
        let index = self.store.cursor().unwrap_or(0);
        self.commit_index(index)
    }

    /// Close the list, keeping the typed text.
    pub fn escape(&mut self) -> NavOutcome {
        self.dismiss()
    }

    /// What: Close an open list (Escape or a click outside the combobox).
    ///
    /// Output:
    /// - `Dismissed` when a list was open, otherwise `Inactive`
    ///
    /// Details:
    /// - Text and status are kept; a resolution is never touched
    pub fn dismiss(&mut self) -> NavOutcome {
        if self.state != ComboState::Suggesting {
            return NavOutcome::Inactive;
        }
        self.store.clear();
        self.state = ComboState::Empty;
        NavOutcome::Dismissed
    }

    /// What: Commit suggestion `index` directly (pointer pick).
    ///
    /// Inputs:
    /// - `index`: Row in the current list
    ///
    /// Output:
    /// - `Committed`, or `Inactive` when no list is open or the row does not exist
    ///
    /// Details:
    /// - Field text becomes `display`, or `"city, country"` when the service sent none
    /// - The list is cleared and the field locks
    pub fn commit_index(&mut self, index: usize) -> NavOutcome {
        if !self.list_open() {
            return NavOutcome::Inactive;
        }
        let Some(item) = self.store.get(index).cloned() else {
            return NavOutcome::Inactive;
        };
        let location = ResolvedLocation::from(&item);
        self.input = if item.display.trim().is_empty() {
            location.service_city()
        } else {
            item.display
        };
        self.status = Some(StatusMessage {
            text: StatusText::Key {
                key: "selected_city",
                vars: vec![
                    ("city", location.city.clone()),
                    ("timezone", location.timezone.clone()),
                ],
            },
            tone: StatusTone::Found,
        });
        tracing::info!(city = %location.city, timezone = %location.timezone, "location resolved");
        self.store.clear();
        self.state = ComboState::Resolved(location);
        NavOutcome::Committed
    }

    /// What: Return to a blank combobox.
    ///
    /// Details:
    /// Output:
    /// - Cancel marker for the debounce worker
    ///
    /// Details:
    /// - Clears text, suggestions, resolution and status
    /// - Bumps the generation so in-flight searches are dropped on arrival
    pub fn reset(&mut self) -> QueryInput {
        self.input.clear();
        self.store.clear();
        self.state = ComboState::Empty;
        self.status = None;
        QueryInput::cancel(self.bump_generation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(city: &str, country: &str, tz: &str) -> LocationSuggestion {
        LocationSuggestion {
            display: format!("{city}, {country}"),
            city: city.into(),
            country: country.into(),
            timezone: tz.into(),
        }
    }

    fn typed(resolver: &mut LocationResolver, text: &str) -> QueryInput {
        resolver
            .on_input(text.to_string())
            .expect("non-blank text yields a query")
    }

    fn open_with(resolver: &mut LocationResolver, items: Vec<LocationSuggestion>) {
        let q = typed(resolver, "Hel");
        assert_eq!(
            resolver.apply_search_result(q.id, Ok(items)),
            SearchApply::Applied
        );
    }

    #[test]
    /// What: Only the newest query's answer is shown, whatever the arrival order.
    ///
    /// Inputs:
    /// - Two queries; the newer answer arrives first, then the older one
    ///
    /// Output:
    /// - Newer list shown, older answer reported `Stale` and ignored
    fn stale_results_never_replace_newer_ones() {
        let mut r = LocationResolver::default();
        let old = typed(&mut r, "Hel");
        let new = typed(&mut r, "Hels");
        assert!(new.id > old.id);

        let newest = vec![suggestion("Helsinki", "Finland", "Europe/Helsinki")];
        assert_eq!(
            r.apply_search_result(new.id, Ok(newest.clone())),
            SearchApply::Applied
        );
        assert_eq!(
            r.apply_search_result(old.id, Ok(vec![suggestion("Helena", "USA", "America/Denver")])),
            SearchApply::Stale
        );
        assert_eq!(r.suggestions().items(), newest.as_slice());
    }

    #[test]
    fn stale_error_does_not_clobber_open_list() {
        let mut r = LocationResolver::default();
        let old = typed(&mut r, "Hel");
        open_with(&mut r, vec![suggestion("Helsinki", "Finland", "Europe/Helsinki")]);
        assert_eq!(
            r.apply_search_result(old.id, Err(ServiceError::Transport("late".into()))),
            SearchApply::Stale
        );
        assert!(r.list_open());
    }

    #[test]
    /// What: A blank query clears everything and issues no request.
    ///
    /// Inputs:
    /// - Whitespace-only input after an open list
    ///
    /// Output:
    /// - Cancel marker for the new generation, state `Empty`, no status
    fn blank_query_issues_no_request() {
        let mut r = LocationResolver::default();
        open_with(&mut r, vec![suggestion("Helsinki", "Finland", "Europe/Helsinki")]);
        let before = r.latest_query_id();
        let q = r.on_input("   ".into()).expect("blank edit still reports");
        assert!(q.is_cancel());
        assert_eq!(q.id, r.latest_query_id());
        assert_eq!(r.state(), &ComboState::Empty);
        assert!(r.status().is_none());
        assert!(r.suggestions().is_empty());
        assert!(r.latest_query_id() > before);
    }

    #[test]
    fn query_text_is_trimmed() {
        let mut r = LocationResolver::default();
        let q = typed(&mut r, "  Oulu ");
        assert_eq!(q.text, "Oulu");
        assert_eq!(r.input(), "  Oulu ");
        assert_eq!(r.state(), &ComboState::Searching);
    }

    #[test]
    /// What: Keyboard commit locks the field and an edit unlocks it.
    ///
    /// Inputs:
    /// - Two suggestions, Down then Enter; later typing and Backspace
    ///
    /// Output:
    /// - Resolved with display text; typing ignored; Backspace clears resolution
    fn keyboard_commit_locks_and_edit_unlocks() {
        let mut r = LocationResolver::default();
        open_with(
            &mut r,
            vec![
                suggestion("Helsinki", "Finland", "Europe/Helsinki"),
                suggestion("Helsingborg", "Sweden", "Europe/Stockholm"),
            ],
        );
        assert_eq!(r.move_down(), NavOutcome::Moved(0));
        assert_eq!(r.move_down(), NavOutcome::Moved(1));
        assert_eq!(r.enter(), NavOutcome::Committed);
        assert!(r.is_locked());
        assert_eq!(r.input(), "Helsingborg, Sweden");
        let loc = r.resolved_for_submit().expect("resolved");
        assert_eq!(loc.timezone, "Europe/Stockholm");
        assert_eq!(r.status().map(|s| s.tone), Some(StatusTone::Found));

        assert_eq!(r.on_char('x'), None);
        assert_eq!(r.input(), "Helsingborg, Sweden");

        let q = r.on_backspace().expect("edit re-queries");
        assert_eq!(q.text, "Helsingborg, Swede");
        assert!(r.resolved_for_submit().is_none());
        assert!(!r.is_locked());
    }

    #[test]
    fn enter_without_cursor_commits_first_item() {
        let mut r = LocationResolver::default();
        open_with(
            &mut r,
            vec![
                suggestion("Helsinki", "Finland", "Europe/Helsinki"),
                suggestion("Helena", "USA", "America/Denver"),
            ],
        );
        assert_eq!(r.enter(), NavOutcome::Committed);
        assert_eq!(
            r.resolved_for_submit().map(|l| l.city.as_str()),
            Some("Helsinki")
        );
    }

    #[test]
    /// What: Pointer pick commits the clicked row regardless of the highlight.
    ///
    /// Inputs:
    /// - Cursor on row 0, click on row 1 whose display is blank
    ///
    /// Output:
    /// - Row 1 resolved; field shows `"city, country"`
    fn pointer_pick_ignores_cursor() {
        let mut r = LocationResolver::default();
        let mut second = suggestion("Tampere", "Finland", "Europe/Helsinki");
        second.display.clear();
        open_with(
            &mut r,
            vec![suggestion("Helsinki", "Finland", "Europe/Helsinki"), second],
        );
        r.move_down();
        assert_eq!(r.commit_index(1), NavOutcome::Committed);
        assert_eq!(r.input(), "Tampere, Finland");
        assert_eq!(r.commit_index(0), NavOutcome::Inactive);
    }

    #[test]
    fn navigation_is_inactive_without_open_list() {
        let mut r = LocationResolver::default();
        assert_eq!(r.move_down(), NavOutcome::Inactive);
        assert_eq!(r.move_up(), NavOutcome::Inactive);
        assert_eq!(r.enter(), NavOutcome::Inactive);
        assert_eq!(r.escape(), NavOutcome::Inactive);

        open_with(&mut r, Vec::new());
        assert_eq!(r.state(), &ComboState::Suggesting);
        assert!(!r.list_open());
        assert_eq!(r.move_down(), NavOutcome::Inactive);
        assert_eq!(
            r.status().map(|s| s.text.clone()),
            Some(StatusText::key("pick_city"))
        );
    }

    #[test]
    fn escape_dismisses_and_keeps_text() {
        let mut r = LocationResolver::default();
        open_with(&mut r, vec![suggestion("Helsinki", "Finland", "Europe/Helsinki")]);
        assert_eq!(r.escape(), NavOutcome::Dismissed);
        assert_eq!(r.state(), &ComboState::Empty);
        assert_eq!(r.input(), "Hel");
        assert!(r.suggestions().is_empty());
    }

    #[test]
    /// What: Search failures surface service detail, else the localized fallback.
    ///
    /// Inputs:
    /// - One failure with detail, one transport failure
    ///
    /// Output:
    /// - Literal detail, then `suggest_error`; both error tone with an empty list
    fn search_failure_sets_error_status() {
        let mut r = LocationResolver::default();
        let q = typed(&mut r, "Atlantis");
        r.apply_search_result(
            q.id,
            Err(ServiceError::Service {
                status: 502,
                detail: Some("Geocoder down".into()),
            }),
        );
        let status = r.status().expect("status");
        assert_eq!(status.text, StatusText::Literal("Geocoder down".into()));
        assert_eq!(status.tone, StatusTone::Error);
        assert_eq!(r.state(), &ComboState::Empty);

        let q = typed(&mut r, "Atlantis ");
        r.apply_search_result(q.id, Err(ServiceError::Transport("refused".into())));
        assert_eq!(
            r.status().map(|s| s.text.clone()),
            Some(StatusText::key("suggest_error"))
        );
    }

    #[test]
    fn reset_invalidates_in_flight_search() {
        let mut r = LocationResolver::default();
        let q = typed(&mut r, "Hel");
        let cancel = r.reset();
        assert!(cancel.is_cancel());
        assert_eq!(cancel.id, r.latest_query_id());
        assert_eq!(
            r.apply_search_result(q.id, Ok(vec![suggestion("Helsinki", "Finland", "Europe/Helsinki")])),
            SearchApply::Stale
        );
        assert_eq!(r.input(), "");
        assert!(r.status().is_none());
    }

    #[test]
    fn delete_and_clear_unlock_a_resolved_field() {
        let mut r = LocationResolver::default();
        open_with(&mut r, vec![suggestion("Helsinki", "Finland", "Europe/Helsinki")]);
        r.enter();
        let q = r.on_delete().expect("unlock re-queries");
        assert_eq!(q.text, "Helsinki, Finland");
        assert!(!r.is_locked());
        assert_eq!(r.on_delete(), None);

        open_with(&mut r, vec![suggestion("Helsinki", "Finland", "Europe/Helsinki")]);
        r.enter();
        assert!(r.clear().is_some_and(|q| q.is_cancel()));
        assert_eq!(r.state(), &ComboState::Empty);
    }
}
