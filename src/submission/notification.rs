use std::time::{Duration, Instant};

/// How long a success notification stays visible.
pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);
/// How long a validation notification stays visible.
pub const VALIDATION_DURATION: Duration = Duration::from_secs(3);
/// How long a request failure notification stays visible.
pub const REQUEST_ERROR_DURATION: Duration = Duration::from_secs(5);

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message shown to the user for a fixed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    kind: NotificationKind,
    title: String,
    message: String,
    created_at: Instant,
    duration: Duration,
}

impl Notification {
    /// Creates a notification that expires `duration` after now.
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            created_at: Instant::now(),
            duration,
        }
    }

    /// Success notification after a query resolved.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, "Success", message, SUCCESS_DURATION)
    }

    /// Error notification for input rejected before submission.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, "Error", message, VALIDATION_DURATION)
    }

    /// Error notification for a failed request.
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, "Error", message, REQUEST_ERROR_DURATION)
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns true once the notification's display time has passed at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }
}
