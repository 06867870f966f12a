//! Schema validation of model output.
//!
//! Models are told to answer with bare JSON but regularly wrap it in a fenced
//! code block anyway, so one leading and one trailing fence marker are tolerated.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::StructuredSummary;

const REQUIRED_FIELDS: [&str; 4] = ["title", "overview", "key_points", "conclusion"];
const RAW_PREFIX_CHARS: usize = 200;

static LEADING_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+-]*[ \t]*\r?\n?").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid JSON response: {source}\n\nRaw response:\n{raw_prefix}")]
    InvalidJson {
        source: serde_json::Error,
        raw_prefix: String,
    },

    #[error("Response is not a JSON object\n\nRaw response:\n{raw_prefix}")]
    NotAnObject { raw_prefix: String },

    #[error("Missing required JSON fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("'key_points' must be a list of strings")]
    KeyPointsNotStrings,
}

/// Parses `raw` into a [`StructuredSummary`], failing when it is not a JSON
/// object carrying the four required fields.
pub fn validate(raw: &str) -> Result<StructuredSummary, ValidationError> {
    let text = strip_code_fence(raw);

    let value = serde_json::from_str::<Value>(text).map_err(|source| ValidationError::InvalidJson {
        source,
        raw_prefix: raw_prefix(raw),
    })?;

    let Value::Object(object) = value else {
        return Err(ValidationError::NotAnObject {
            raw_prefix: raw_prefix(raw),
        });
    };

    let missing = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !object.contains_key(*field))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    match &object["key_points"] {
        Value::Array(points) if points.iter().all(Value::is_string) => {}
        _ => return Err(ValidationError::KeyPointsNotStrings),
    }

    serde_json::from_value(Value::Object(object)).map_err(|source| ValidationError::InvalidJson {
        source,
        raw_prefix: raw_prefix(raw),
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let text = match LEADING_FENCE_RE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    text.strip_suffix("```").unwrap_or(text).trim()
}

fn raw_prefix(raw: &str) -> String {
    raw.chars().take(RAW_PREFIX_CHARS).collect()
}
