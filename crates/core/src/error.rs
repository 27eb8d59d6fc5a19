use std::error::Error;
use std::fmt::{self, Display};

use crate::SessionId;

/// The state of a session could not be reached.
///
/// This happens when the session registry has been shut down, or stopped
/// before it acknowledged a request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LookupError {
    session: SessionId,
}

impl LookupError {
    #[inline]
    pub(crate) fn new(session: SessionId) -> Self {
        Self { session }
    }

    /// Returns the session whose state was unavailable.
    #[inline]
    pub fn session(&self) -> &SessionId {
        &self.session
    }
}

impl Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state of session `{}` is unavailable", self.session)
    }
}

impl Error for LookupError {}

/// An action could not complete.
///
/// Fetch failures are not errors at this level, they are reported as a
/// failed [`ActionOutcome`](pet_facts_model::ActionOutcome) instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionError {
    /// The fetched value could not be written to the session's store.
    Lookup(LookupError),
}

impl Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Lookup(err) => {
                write!(f, "failed to remember the fetched value: {err}")
            }
        }
    }
}

impl Error for ActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ActionError::Lookup(err) => Some(err),
        }
    }
}

impl From<LookupError> for ActionError {
    #[inline]
    fn from(err: LookupError) -> Self {
        ActionError::Lookup(err)
    }
}
