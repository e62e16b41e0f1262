pub mod api;
pub mod config;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod submission;
pub mod tui;

#[cfg(test)]
mod test_support;

pub use api::{QueryClient, QueryClientBuilder, QueryClientTrait, RequestError};
pub use config::{Config, ConfigOverrides};
pub use models::{Query, QueryResponse, SourceNode, ValidationError};
pub use submission::{Notification, NotificationKind, SubmissionFlow, SubmissionState, SubmitError};
