//! Status line content, stored as translation keys so a language switch re-renders it.

use crate::i18n::TextProvider;

/// Visual tone of the status line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusTone {
    /// Informational text.
    #[default]
    Neutral,
    /// A location has been found and committed.
    Found,
    /// Something failed or a precondition was not met.
    Error,
}

/// Text of a status message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusText {
    /// Translation key with `{name}` variables, rendered in the active language.
    Key {
        /// Dictionary key.
        key: &'static str,
        /// Interpolation variables.
        vars: Vec<(&'static str, String)>,
    },
    /// Text supplied by the service, shown verbatim.
    Literal(String),
}

impl StatusText {
    /// Key without variables.
    #[must_use]
    pub const fn key(key: &'static str) -> Self {
        Self::Key {
            key,
            vars: Vec::new(),
        }
    }
}

/// One status line message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    /// What to show.
    pub text: StatusText,
    /// How to colour it.
    pub tone: StatusTone,
}

impl StatusMessage {
    /// Neutral message from a key.
    #[must_use]
    pub const fn neutral(key: &'static str) -> Self {
        Self {
            text: StatusText::key(key),
            tone: StatusTone::Neutral,
        }
    }

    /// Error message with arbitrary text.
    #[must_use]
    pub const fn error(text: StatusText) -> Self {
        Self {
            text,
            tone: StatusTone::Error,
        }
    }

    /// What: Render the message in the provider's active language.
    ///
    /// Inputs:
    /// - `text`: Active text provider
    ///
    /// Output:
    /// - Display string
    #[must_use]
    pub fn render(&self, text: &TextProvider) -> String {
        match &self.text {
            StatusText::Key { key, vars } => text.t_vars(key, vars),
            StatusText::Literal(s) => s.clone(),
        }
    }
}
