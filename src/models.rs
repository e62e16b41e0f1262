mod query;
mod query_response;

pub use query::{Query, ValidationError};
pub use query_response::{QueryResponse, SourceNode};
