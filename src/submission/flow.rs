use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;
use tracing::{debug, info};

use crate::api::{QueryClientTrait, RequestError};
use crate::models::{Query, QueryResponse, ValidationError};

use super::notification::Notification;
use super::state::SubmissionState;

/// Message of the notification shown after a successful query.
pub const SUCCESS_MESSAGE: &str = "Query submitted successfully";

type Outcome = Result<QueryResponse, RequestError>;

/// Reasons `on_submit` refuses to start a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The input failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A request is already in flight.
    #[error("A query is already being processed")]
    InFlight,
}

/// Drives one query submission at a time.
///
/// `on_submit` validates the text and starts the backend call on a worker
/// thread. The owner then calls `poll` from its event loop (or `wait` when
/// it can block) to apply the outcome. The last successful response stays
/// available through `displayed` until another submission succeeds.
pub struct SubmissionFlow {
    client: Arc<dyn QueryClientTrait>,
    state: SubmissionState,
    displayed: Option<QueryResponse>,
    in_flight: Option<Receiver<Outcome>>,
    notifications: Vec<Notification>,
}

impl SubmissionFlow {
    /// Creates an idle flow that submits through `client`.
    pub fn new(client: Arc<dyn QueryClientTrait>) -> Self {
        Self {
            client,
            state: SubmissionState::Idle,
            displayed: None,
            in_flight: None,
            notifications: Vec::new(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Returns true while a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Returns the response currently shown to the user, if any.
    pub fn displayed(&self) -> Option<&QueryResponse> {
        self.displayed.as_ref()
    }

    /// Takes the notifications emitted since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Handles a user submission of `text`.
    ///
    /// Empty or whitespace-only text is rejected with a validation
    /// notification and no network call; the state does not change.
    /// Otherwise the flow moves to `Pending` and exactly one request is
    /// started.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Validation` for empty input and
    /// `SubmitError::InFlight` while a previous request is outstanding.
    pub fn on_submit(&mut self, text: &str) -> Result<(), SubmitError> {
        if self.is_pending() {
            debug!("submission ignored while a request is in flight");
            return Err(SubmitError::InFlight);
        }

        let query = match Query::new(text) {
            Ok(query) => query,
            Err(error) => {
                debug!("rejected empty query");
                self.notifications
                    .push(Notification::validation(error.to_string()));
                return Err(error.into());
            }
        };

        info!(chars = query.as_str().chars().count(), "submitting query");

        let (sender, receiver) = mpsc::channel();
        let client = Arc::clone(&self.client);
        thread::spawn(move || {
            let outcome = client.submit(query.as_str());
            // The flow may have been dropped; nobody is left to tell
            let _ = sender.send(outcome);
        });

        self.in_flight = Some(receiver);
        self.state = SubmissionState::Pending;
        Ok(())
    }

    /// Applies the outstanding request's outcome if it has arrived.
    ///
    /// Never blocks. Returns true if the request resolved during this call.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.in_flight else {
            return false;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(RequestError::Aborted),
        };

        self.resolve(outcome);
        true
    }

    /// Blocks until the outstanding request resolves and applies it.
    ///
    /// Returns false if nothing was in flight.
    pub fn wait(&mut self) -> bool {
        let Some(receiver) = self.in_flight.take() else {
            return false;
        };

        let outcome = receiver.recv().unwrap_or(Err(RequestError::Aborted));
        self.resolve(outcome);
        true
    }

    fn resolve(&mut self, outcome: Outcome) {
        self.in_flight = None;

        match outcome {
            Ok(response) => {
                info!(sources = response.source_nodes.len(), "query succeeded");
                self.displayed = Some(response.clone());
                self.state = SubmissionState::Succeeded(response);
                self.notifications.push(Notification::success(SUCCESS_MESSAGE));
            }
            Err(error) => {
                info!(error = %error, "query failed");
                self.notifications
                    .push(Notification::request_failed(error.to_string()));
                self.state = SubmissionState::Failed(error);
            }
        }
    }
}
