//! Request lifecycle of the product fetch.

use std::fmt;

/// Where the product fetch stands. Exactly one variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Fetch issued, result pending.
    InProgress,
    /// Product loaded.
    Success,
    /// Product could not be loaded.
    Failure,
}

impl RequestStatus {
    /// State after a fetch is issued. Valid from any state.
    pub fn begin(self) -> Self {
        Self::InProgress
    }

    /// State after a pending fetch resolves, or `None` if no fetch is pending.
    pub fn resolve(self, loaded: bool) -> Option<Self> {
        match self {
            Self::InProgress if loaded => Some(Self::Success),
            Self::InProgress => Some(Self::Failure),
            _ => None,
        }
    }

    /// Stable name, used in logs and markup.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "INITIAL",
            Self::InProgress => "IN_PROGRESS",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
