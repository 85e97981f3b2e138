//! Parsers that extract structured data from free-form model output.
//!
//! Models wrap their JSON in prose, markdown fences, or nothing at all;
//! [`extract_json_from_text`] tries the strict parse first and degrades
//! from there. Every parser fails loudly on unusable input so the batch
//! executor's per-batch isolation is the sole failure boundary.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::types::{ChunkSummary, QaPair, RatedQaPair};

/// Errors raised while parsing model output.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no JSON found in model output")]
    NoJson,

    #[error("unexpected JSON shape: {0}")]
    UnexpectedShape(String),

    #[error("empty model output")]
    Empty,
}

/// Strategy mapping one raw completion to zero or more task outputs.
///
/// `index` is the global position of the prompt set that produced the
/// response, so parsers can tag outputs with their source chunk.
pub trait ResponseParser: Send + Sync {
    type Output;

    fn parse(&self, index: usize, raw: &str) -> Result<Vec<Self::Output>, ParseError>;
}

/// Parser for per-chunk summary responses.
///
/// Summaries are plain text; the parser only rejects empty output and
/// tags the result with its chunk index.
pub struct SummaryParser;

impl ResponseParser for SummaryParser {
    type Output = ChunkSummary;

    fn parse(&self, index: usize, raw: &str) -> Result<Vec<ChunkSummary>, ParseError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(vec![ChunkSummary {
            chunk_index: index,
            text: text.to_string(),
        }])
    }
}

/// Parser for QA generation responses: a JSON array of
/// `{question, answer}` records, or a single such object.
pub struct QaPairParser;

impl ResponseParser for QaPairParser {
    type Output = QaPair;

    fn parse(&self, _index: usize, raw: &str) -> Result<Vec<QaPair>, ParseError> {
        let value = extract_json_from_text(raw)?;
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item)
                        .map_err(|e| ParseError::UnexpectedShape(e.to_string()))
                })
                .collect(),
            Value::Object(_) => serde_json::from_value::<QaPair>(value)
                .map(|pair| vec![pair])
                .map_err(|e| ParseError::UnexpectedShape(e.to_string())),
            other => Err(ParseError::UnexpectedShape(format!(
                "expected array or object, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MaybeRatedPair {
    question: String,
    answer: String,
    rating: Option<f64>,
}

/// Parse rated pairs out of a rating response.
///
/// Entries the model returned without a numeric rating are skipped; a
/// response that is not a JSON array of pairs is an error.
pub fn parse_ratings(raw: &str) -> Result<Vec<RatedQaPair>, ParseError> {
    let value = extract_json_from_text(raw)?;
    let items: Vec<MaybeRatedPair> =
        serde_json::from_value(value).map_err(|e| ParseError::UnexpectedShape(e.to_string()))?;

    Ok(items
        .into_iter()
        .filter_map(|item| {
            item.rating.map(|rating| RatedQaPair {
                question: item.question,
                answer: item.answer,
                rating,
            })
        })
        .collect())
}

/// Extract a JSON value from text that may wrap it in markdown or prose.
///
/// Tries, in order: the whole trimmed text, the first fenced code block,
/// then the widest brace/bracket span.
pub fn extract_json_from_text(text: &str) -> Result<Value, ParseError> {
    lazy_static! {
        static ref FENCED: Regex = Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").unwrap();
        static ref SPAN: Regex = Regex::new(r"\{[\s\S]*\}|\[[\s\S]*\]").unwrap();
    }

    let text = text.trim();

    if (text.starts_with('{') && text.ends_with('}'))
        || (text.starts_with('[') && text.ends_with(']'))
    {
        if let Ok(value) = serde_json::from_str(text) {
            return Ok(value);
        }
    }

    if let Some(caps) = FENCED.captures(text) {
        let inner = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        if let Ok(value) = serde_json::from_str(inner) {
            return Ok(value);
        }
    }

    if let Some(found) = SPAN.find(text) {
        if let Ok(value) = serde_json::from_str(found.as_str()) {
            return Ok(value);
        }
    }

    Err(ParseError::NoJson)
}
