//! Shared fakes for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::api::{QueryClientTrait, RequestError};
use crate::models::{QueryResponse, SourceNode};
use crate::submission::SubmissionFlow;
use crate::tui::App;

/// One canned backend reply.
#[derive(Clone)]
pub enum Reply {
    Answer(QueryResponse),
    /// A 500 with the given `detail`
    Fail(Option<String>),
}

/// Client that replays scripted replies; the last one repeats forever.
pub struct StaticClient {
    calls: AtomicUsize,
    replies: Vec<Reply>,
}

impl StaticClient {
    /// Replies with each entry of `replies` in turn.
    pub fn scripted(replies: Vec<Reply>) -> Arc<Self> {
        assert!(!replies.is_empty(), "at least one reply is required");
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            replies,
        })
    }

    /// Always succeeds with `response`.
    pub fn ok(response: QueryResponse) -> Arc<Self> {
        Self::scripted(vec![Reply::Answer(response)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QueryClientTrait for StaticClient {
    fn submit(&self, _query: &str) -> Result<QueryResponse, RequestError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.replies[call.min(self.replies.len() - 1)] {
            Reply::Answer(response) => Ok(response.clone()),
            Reply::Fail(detail) => Err(RequestError::Http {
                status: 500,
                detail: detail.clone(),
            }),
        }
    }
}

/// The "What is attention?" answer with a single cited passage.
pub fn attention_response() -> QueryResponse {
    QueryResponse {
        answer: "A mechanism...".to_string(),
        source_nodes: vec![
            SourceNode::new("Scaled dot-product attention.")
                .with_score(0.91)
                .with_doc_id("D1"),
        ],
    }
}

/// Builds an app whose submissions go to `client`.
pub fn app_with(client: &Arc<StaticClient>) -> App {
    App::new(SubmissionFlow::new(
        Arc::clone(client) as Arc<dyn QueryClientTrait>
    ))
}

/// Ticks the app until no request is in flight.
pub fn settle(app: &mut App) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.is_pending() {
        assert!(Instant::now() < deadline, "request never resolved");
        std::thread::sleep(Duration::from_millis(5));
        app.tick(Instant::now());
    }
}
