use serde::{Deserialize, Serialize};

/// Answer returned by the question-answering backend.
///
/// `source_nodes` keeps the backend's ranking order; nothing in this
/// crate re-sorts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The generated answer text.
    pub answer: String,
    /// Passages cited as evidence, in ranking order.
    #[serde(default)]
    pub source_nodes: Vec<SourceNode>,
}

/// A retrieved passage offered as evidence for an answer.
///
/// Every field except `text` is optional. A missing field means
/// "not applicable", never zero or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    /// The passage text.
    pub text: String,
    /// Backend-supplied relevance score, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Identifier of the document the passage came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    /// Link to the paper on arXiv.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arxiv_url: Option<String>,
}

impl SourceNode {
    /// Creates a node with only passage text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            score: None,
            doc_id: None,
            arxiv_url: None,
        }
    }

    /// Sets the relevance score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Sets the document identifier.
    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    /// Sets the arXiv link.
    pub fn with_arxiv_url(mut self, url: impl Into<String>) -> Self {
        self.arxiv_url = Some(url.into());
        self
    }

    /// Returns the arXiv link when it is present and non-empty.
    pub fn arxiv_link(&self) -> Option<&str> {
        self.arxiv_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Returns true if the node carries a document id or a usable link.
    pub fn has_citation(&self) -> bool {
        self.doc_id.is_some() || self.arxiv_link().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_response() {
        let body = r#"{
            "answer": "A mechanism...",
            "source_nodes": [
                {"text": "first", "score": 0.91, "doc_id": "D1"},
                {"text": "second", "arxiv_url": "https://arxiv.org/abs/1706.03762"}
            ]
        }"#;

        let response: QueryResponse = serde_json::from_str(body).expect("valid response");
        assert_eq!(response.answer, "A mechanism...");
        assert_eq!(response.source_nodes.len(), 2);
        assert_eq!(response.source_nodes[0].score, Some(0.91));
        assert_eq!(response.source_nodes[0].doc_id.as_deref(), Some("D1"));
        assert_eq!(response.source_nodes[0].arxiv_url, None);
        assert_eq!(
            response.source_nodes[1].arxiv_link(),
            Some("https://arxiv.org/abs/1706.03762")
        );
    }

    #[test]
    fn missing_source_nodes_decode_as_empty() {
        let response: QueryResponse =
            serde_json::from_str(r#"{"answer": "nothing cited"}"#).expect("valid response");
        assert!(response.source_nodes.is_empty());
    }

    #[test]
    fn null_optionals_decode_as_absent() {
        let node: SourceNode =
            serde_json::from_str(r#"{"text": "t", "score": null, "doc_id": null}"#)
                .expect("valid node");
        assert_eq!(node, SourceNode::new("t"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let node: SourceNode =
            serde_json::from_str(r#"{"text": "t", "page": 4}"#).expect("valid node");
        assert_eq!(node.text, "t");
    }

    #[test]
    fn missing_answer_is_rejected() {
        let result = serde_json::from_str::<QueryResponse>(r#"{"source_nodes": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn source_order_is_preserved() {
        let body = r#"{"answer": "a", "source_nodes": [
            {"text": "c", "score": 0.1},
            {"text": "a", "score": 0.9},
            {"text": "b", "score": 0.5}
        ]}"#;
        let response: QueryResponse = serde_json::from_str(body).expect("valid response");
        let texts: Vec<&str> = response
            .source_nodes
            .iter()
            .map(|node| node.text.as_str())
            .collect();
        assert_eq!(texts, vec!["c", "a", "b"]);
    }

    #[test]
    fn empty_arxiv_url_is_not_a_link() {
        let node = SourceNode::new("t").with_arxiv_url("");
        assert_eq!(node.arxiv_link(), None);
        assert!(!node.has_citation());
    }

    #[test]
    fn doc_id_counts_as_citation() {
        assert!(SourceNode::new("t").with_doc_id("D1").has_citation());
        assert!(!SourceNode::new("t").with_score(0.5).has_citation());
    }
}
