use crate::api::RequestError;
use crate::models::QueryResponse;

/// Where the submission flow currently is.
///
/// Transitions: `Idle`/`Succeeded`/`Failed` -> `Pending` on submit, and
/// `Pending` -> `Succeeded`/`Failed` when the call resolves. Validation
/// failures leave the state untouched.
#[derive(Debug, Default)]
pub enum SubmissionState {
    /// Nothing has been submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request succeeded.
    Succeeded(QueryResponse),
    /// The last request failed.
    Failed(RequestError),
}

impl SubmissionState {
    /// Returns true while a request is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    /// Returns the failure of the last request, if it failed.
    pub fn error(&self) -> Option<&RequestError> {
        match self {
            SubmissionState::Failed(error) => Some(error),
            _ => None,
        }
    }
}
