//! Ordered suggestion list with a wrap-around cursor.

use super::types::LocationSuggestion;

/// The most recent suggestion list and the keyboard cursor inside it.
///
/// The cursor is `None` whenever the list changes; movement wraps at both ends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestionStore {
    /// Suggestions in server relevance order.
    items: Vec<LocationSuggestion>,
    /// Highlighted row, if any.
    cursor: Option<usize>,
}

impl SuggestionStore {
    /// Replace the list and reset the cursor.
    pub fn replace(&mut self, items: Vec<LocationSuggestion>) {
        self.items = items;
        self.cursor = None;
    }

    /// Drop every suggestion and reset the cursor.
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = None;
    }

    /// Current suggestions.
    #[must_use]
    pub fn items(&self) -> &[LocationSuggestion] {
        &self.items
    }

    /// Number of suggestions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when there is nothing to pick.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highlighted row.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Suggestion at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LocationSuggestion> {
        self.items.get(index)
    }

    /// What: Move the cursor one row down, wrapping to the top.
    ///
    /// Output:
    /// - New cursor; `None` only when the list is empty
    ///
    /// Details:
    /// - From no cursor the first row is highlighted
    pub fn move_down(&mut self) -> Option<usize> {
        let n = self.items.len();
        if n == 0 {
            return None;
        }
        let next = self.cursor.map_or(0, |c| (c + 1) % n);
        self.cursor = Some(next);
        self.cursor
    }

    /// What: Move the cursor one row up, wrapping to the bottom.
    ///
    /// Output:
    /// - New cursor; `None` only when the list is empty
    ///
    /// Details:
    /// - From no cursor the last row is highlighted
    pub fn move_up(&mut self) -> Option<usize> {
        let n = self.items.len();
        if n == 0 {
            return None;
        }
        let next = match self.cursor {
            None | Some(0) => n - 1,
            Some(c) => c - 1,
        };
        self.cursor = Some(next);
        self.cursor
    }
}
