//! Birth date/time fields and the input-view focus ring.

use chrono::{NaiveDate, NaiveTime};

/// Focusable widgets of the input view, in Tab order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    /// Birth date.
    #[default]
    Date,
    /// Birth time.
    Time,
    /// Location combobox.
    Location,
    /// Submit button.
    Submit,
}

impl FormField {
    /// Tab order.
    pub const ALL: [Self; 4] = [Self::Date, Self::Time, Self::Location, Self::Submit];

    const fn position(self) -> usize {
        match self {
            Self::Date => 0,
            Self::Time => 1,
            Self::Location => 2,
            Self::Submit => 3,
        }
    }

    /// Next field in Tab order, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous field in Tab order, wrapping.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Longest accepted date text (`YYYY-MM-DD`).
const DATE_LEN: usize = 10;
/// Longest accepted time text (`HH:MM`).
const TIME_LEN: usize = 5;

/// Date and time as validated for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BirthMoment {
    /// Normalised `YYYY-MM-DD`.
    pub date: String,
    /// Normalised `HH:MM`.
    pub time: String,
}

/// Date/time text fields plus focus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    /// Date text as typed.
    pub date: String,
    /// Time text as typed.
    pub time: String,
    /// Focused widget.
    pub focus: FormField,
}

impl FormState {
    /// What: Type a character into the focused date or time field.
    ///
    /// Inputs:
    /// - `c`: Typed character
    ///
    /// Output:
    /// - `true` when the field changed
    ///
    /// Details:
    /// - Date accepts digits and `-`; time accepts digits and `:`; both are length-capped
    pub fn on_char(&mut self, c: char) -> bool {
        let (field, sep, cap) = match self.focus {
            FormField::Date => (&mut self.date, '-', DATE_LEN),
            FormField::Time => (&mut self.time, ':', TIME_LEN),
            FormField::Location | FormField::Submit => return false,
        };
        if !(c.is_ascii_digit() || c == sep) || field.len() >= cap {
            return false;
        }
        field.push(c);
        true
    }

    /// Remove the last character of the focused date or time field.
    pub fn on_backspace(&mut self) -> bool {
        match self.focus {
            FormField::Date => self.date.pop().is_some(),
            FormField::Time => self.time.pop().is_some(),
            FormField::Location | FormField::Submit => false,
        }
    }

    /// What: Validate both fields for submission.
    ///
    /// Output:
    /// - `Ok(BirthMoment)` with normalised text, or `Err(key)` naming the status message
    ///
    /// # Errors
    /// - `invalid_date` when the date is not a real `YYYY-MM-DD` calendar day
    /// - `invalid_time` when the time is not a valid `HH:MM`
    pub fn validated(&self) -> Result<BirthMoment, &'static str> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "invalid_date")?;
        let time =
            NaiveTime::parse_from_str(self.time.trim(), "%H:%M").map_err(|_| "invalid_time")?;
        Ok(BirthMoment {
            date: date.format("%Y-%m-%d").to_string(),
            time: time.format("%H:%M").to_string(),
        })
    }
}
