use std::fmt;

use thiserror::Error;

/// Message shown to the user when a submission has no content.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a query";

/// Validation failures raised before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The query was empty or contained only whitespace.
    #[error("{}", EMPTY_QUERY_MESSAGE)]
    EmptyQuery,
}

/// A natural-language question submitted by the user.
///
/// A `Query` is guaranteed to contain at least one non-whitespace
/// character. The text is kept exactly as typed; surrounding whitespace
/// is only ignored for the emptiness check.
///
/// # Examples
///
/// ```
/// use paperqa::Query;
///
/// let query = Query::new("What is attention?").unwrap();
/// assert_eq!(query.as_str(), "What is attention?");
///
/// assert!(Query::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Creates a query, rejecting empty or whitespace-only text.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self(text))
    }

    /// Returns the query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the query and returns the owned text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
