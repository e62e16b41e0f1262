/// Backend HTTP client module.
///
/// This module provides the blocking HTTP client used to submit queries to the
/// question-answering backend, along with its error type and builder.
mod client;

pub use client::{
    DEFAULT_BASE_URL, FALLBACK_ERROR_MESSAGE, QueryClient, QueryClientBuilder, QueryClientTrait,
    RequestError,
};
