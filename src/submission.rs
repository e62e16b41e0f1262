//! Query submission flow.
//!
//! Owns the submission state machine, runs the backend call off the UI
//! thread, and reports outcomes as transient notifications.

mod flow;
mod notification;
mod state;

pub use flow::{SUCCESS_MESSAGE, SubmissionFlow, SubmitError};
pub use notification::{Notification, NotificationKind};
pub use state::SubmissionState;
