use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::errors::VantageError;
use crate::llm::types::{ContentBlock, WEB_SEARCH_TOOL_NAME};

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```[a-zA-Z]*").unwrap());

/// Ordered list of web searches the upstream performed, projected from the
/// tool-invocation blocks. Blocks for other tools are ignored.
pub fn search_queries(blocks: &[ContentBlock]) -> Vec<String> {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::ServerToolUse { name, input } if name == WEB_SEARCH_TOOL_NAME => {
                Some(
                    input
                        .get("query")
                        .and_then(|q| q.as_str())
                        .unwrap_or("Searching...")
                        .to_string(),
                )
            }
            _ => None,
        })
        .collect()
}

/// In-order concatenation of all narrative text blocks.
pub fn narrative_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Extract the report object embedded in free-form model output. Fence
/// markers are stripped before bracket search, then the text is scanned for
/// balanced top-level `{...}` spans (string-aware, so a `}` inside a quoted
/// value does not close a span). The first span that parses as JSON wins.
pub fn extract_report(text: &str) -> Result<Value, VantageError> {
    let cleaned = FENCE_RE.replace_all(text, "");
    let Some(start) = cleaned.find('{') else {
        return Err(VantageError::Extraction);
    };

    let spans = balanced_spans(&cleaned);
    let mut parse_err: Option<VantageError> = None;
    let mut parsed = 0usize;
    let mut report: Option<Value> = None;

    for span in &spans {
        match serde_json::from_str::<Value>(span) {
            Ok(value) => {
                parsed += 1;
                if report.is_none() {
                    report = Some(value);
                }
            }
            Err(e) => {
                if parse_err.is_none() {
                    parse_err = Some(VantageError::Parse {
                        reason: e.to_string(),
                        snippet: span.to_string(),
                    });
                }
            }
        }
    }

    if parsed > 1 {
        warn!(spans = parsed, "Multiple JSON objects in model output, keeping the first");
    }
    if let Some(report) = report {
        return Ok(report);
    }
    if let Some(err) = parse_err {
        return Err(err);
    }

    // No span closed. Report the greedy first-{-to-last-} substring when one
    // exists so the malformed payload is still retrievable from logs.
    match cleaned.rfind('}') {
        Some(end) if end > start => Err(VantageError::Parse {
            reason: "unbalanced braces in model output".to_string(),
            snippet: cleaned[start..=end].to_string(),
        }),
        _ => Err(VantageError::Extraction),
    }
}

/// All balanced top-level `{...}` spans, in order of appearance.
fn balanced_spans(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            match matching_brace(bytes, i) {
                Some(end) => {
                    spans.push(&text[i..=end]);
                    i = end + 1;
                    continue;
                }
                None => break,
            }
        }
        i += 1;
    }

    spans
}

/// Index of the `}` closing the `{` at `open`, skipping braces inside JSON
/// strings. None if the brace never closes.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
