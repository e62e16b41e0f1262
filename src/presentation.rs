//! Rendering of query results.
//!
//! Turns a `QueryResponse` into ratatui `Text` without touching any state:
//! the answer first, then one citation block per source node in the order
//! the backend ranked them.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::models::{QueryResponse, SourceNode};

pub const RESULT_HEADING: &str = "Query Result";
pub const SOURCES_HEADING: &str = "Sources";

const DIVIDER_WIDTH: usize = 40;

/// Formats a relevance score with two decimal places.
///
/// Halfway values round away from zero.
///
/// # Examples
///
/// ```
/// use paperqa::presentation::format_score;
///
/// assert_eq!(format_score(0.8357), "0.84");
/// assert_eq!(format_score(1.0), "1.00");
/// assert_eq!(format_score(0.125), "0.13");
/// ```
pub fn format_score(score: f64) -> String {
    // Exact ties sit on odd eighths (0.125, 0.375, ...); round them away
    // from zero instead of to even
    let eighths = score * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let nudged = score + score.signum() * 0.001;
        return format!("{nudged:.2}");
    }
    format!("{score:.2}")
}

/// Style applied to arXiv links.
pub fn link_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Renders a full response: answer, divider, and the cited sources.
pub fn render_response(response: &QueryResponse) -> Text<'_> {
    let mut text = Text::default();

    text.lines.push(heading(RESULT_HEADING));
    text.lines.extend(response.answer.lines().map(Line::from));
    text.lines.push(Line::from(""));
    text.lines.push(Line::from(Span::styled(
        "─".repeat(DIVIDER_WIDTH),
        Style::default().fg(Color::DarkGray),
    )));
    text.lines.push(heading(SOURCES_HEADING));

    if response.source_nodes.is_empty() {
        text.lines.push(Line::from(Span::styled(
            "No sources returned",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    for (index, node) in response.source_nodes.iter().enumerate() {
        text.lines.push(Line::from(""));
        text.lines.extend(render_source(index + 1, node));
    }

    text
}

/// Renders one citation block.
///
/// The passage text is always shown. The metadata line lists, when present,
/// the arXiv link, the document id and the relevance score; it is omitted
/// entirely when the node has none of them.
pub fn render_source(position: usize, node: &SourceNode) -> Vec<Line<'_>> {
    let meta_style = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    let mut passage = node.text.lines();
    let first = passage.next().unwrap_or_default();
    lines.push(Line::from(vec![
        Span::styled(format!("[{position}] "), Style::default().fg(Color::Cyan)),
        Span::raw(first),
    ]));
    lines.extend(passage.map(|line| Line::from(format!("    {line}"))));

    let mut meta: Vec<Span> = Vec::new();
    if node.has_citation() {
        if let Some(url) = node.arxiv_link() {
            meta.push(Span::styled("Source: ", meta_style));
            meta.push(Span::styled(url, link_style()));
        }
        if let Some(doc_id) = node.doc_id.as_deref() {
            if !meta.is_empty() {
                meta.push(Span::raw("  "));
            }
            meta.push(Span::styled(format!("Document: {doc_id}"), meta_style));
        }
    }
    if let Some(score) = node.score {
        if !meta.is_empty() {
            meta.push(Span::raw("  "));
        }
        meta.push(Span::styled(
            format!("Relevance Score: {}", format_score(score)),
            meta_style,
        ));
    }

    if !meta.is_empty() {
        let mut line = vec![Span::raw("    ")];
        line.extend(meta);
        lines.push(Line::from(line));
    }

    lines
}
