//! Error taxonomy for calls to the chart service.

use thiserror::Error;

/// Failure of a single service call.
///
/// The two variants separate "we never got a usable answer" from "the service answered
/// and said no". Both carry enough to build one user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Network unreachable, connection reset, or a body that is not the expected JSON.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Non-2xx status, or a 2xx body carrying a payload-level error field.
    #[error("service reported failure (status {status}): {}", detail.as_deref().unwrap_or("<no detail>"))]
    Service {
        /// HTTP status code of the response.
        status: u16,
        /// `detail` / `error` text supplied by the service, if any.
        detail: Option<String>,
    },
}

impl ServiceError {
    /// What: Service-supplied explanation suitable for showing to the user.
    ///
    /// Output:
    /// - `Some(text)` only for service-reported failures with non-blank detail
    ///
    /// Details:
    /// - A missing field and an empty string are treated the same: both yield `None`
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Service {
                detail: Some(text), ..
            } if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    /// `true` for transport/parse failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_ignores_blank_and_missing_text() {
        let missing = ServiceError::Service {
            status: 400,
            detail: None,
        };
        let blank = ServiceError::Service {
            status: 400,
            detail: Some("  ".into()),
        };
        let given = ServiceError::Service {
            status: 400,
            detail: Some("Unknown city".into()),
        };
        assert_eq!(missing.detail(), None);
        assert_eq!(blank.detail(), None);
        assert_eq!(given.detail(), Some("Unknown city"));
        assert_eq!(ServiceError::Transport("boom".into()).detail(), None);
        assert!(ServiceError::Transport("boom".into()).is_transport());
    }
}
