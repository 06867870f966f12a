use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary shape every completion must follow.
///
/// Only `key_points` has a checked type; the other fields keep whatever JSON
/// value the model returned so the object round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredSummary {
    pub title: Value,
    pub overview: Value,
    pub key_points: Vec<String>,
    pub conclusion: Value,
    /// Any further fields the model returned, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StructuredSummary {
    pub fn new(
        title: impl Into<String>,
        overview: impl Into<String>,
        key_points: Vec<String>,
        conclusion: impl Into<String>,
    ) -> Self {
        Self {
            title: Value::String(title.into()),
            overview: Value::String(overview.into()),
            key_points,
            conclusion: Value::String(conclusion.into()),
            extra: Map::new(),
        }
    }

    pub fn title_text(&self) -> Cow<'_, str> {
        display_text(&self.title)
    }

    pub fn overview_text(&self) -> Cow<'_, str> {
        display_text(&self.overview)
    }

    pub fn conclusion_text(&self) -> Cow<'_, str> {
        display_text(&self.conclusion)
    }
}

/// Strings as-is, `null` as empty, anything else as compact JSON.
fn display_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}
