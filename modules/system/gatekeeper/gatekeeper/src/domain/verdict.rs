use gatekeeper_sdk::AuthMethod;

use super::error::AuthError;

/// Outcome of a single check or of a whole cascade.
///
/// `Error` and `Authorized` stop the cascade; `Denied` lets the next
/// strategy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Authorized(AuthMethod),
    Denied,
    Error(AuthError),
}

impl Verdict {
    /// True when no further strategy may run.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Denied)
    }

    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }
}

impl From<AuthError> for Verdict {
    fn from(err: AuthError) -> Self {
        Self::Error(err)
    }
}
