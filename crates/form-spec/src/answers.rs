use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A submitted or in-progress answer: a single string or a list of strings.
///
/// Multi-select and attachment questions produce `Many`; everything else is a
/// `Scalar`. Comparisons in the condition evaluator pattern-match on the
/// variant instead of inspecting JSON at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Scalar(String),
    Many(Vec<String>),
}

impl AnswerValue {
    /// Empty answers fail required checks the same way absent ones do.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Scalar(text) => text.is_empty(),
            AnswerValue::Many(items) => items.is_empty(),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            AnswerValue::Scalar(text) => Some(text),
            AnswerValue::Many(_) => None,
        }
    }

    /// Items of the answer viewed as a list; a scalar is a one-element list.
    pub fn items(&self) -> Vec<&str> {
        match self {
            AnswerValue::Scalar(text) => vec![text.as_str()],
            AnswerValue::Many(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// String form used by the `contains` operator: lists are comma-joined,
    /// matching how the original form runtime stringified array answers.
    pub fn to_text(&self) -> String {
        match self {
            AnswerValue::Scalar(text) => text.clone(),
            AnswerValue::Many(items) => items.join(","),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            AnswerValue::Scalar(text) => Value::String(text.clone()),
            AnswerValue::Many(items) => Value::Array(
                items
                    .iter()
                    .map(|item| Value::String(item.clone()))
                    .collect(),
            ),
        }
    }

    fn from_json(value: &Value) -> Option<AnswerValue> {
        match value {
            Value::String(text) => Some(AnswerValue::Scalar(text.clone())),
            Value::Bool(flag) => Some(AnswerValue::Scalar(flag.to_string())),
            Value::Number(num) => Some(AnswerValue::Scalar(num.to_string())),
            Value::Array(items) => Some(AnswerValue::Many(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text.clone()),
                        Value::Bool(flag) => Some(flag.to_string()),
                        Value::Number(num) => Some(num.to_string()),
                        _ => None,
                    })
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        AnswerValue::Scalar(text.to_string())
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        AnswerValue::Many(items)
    }
}

/// Mapping from question key to answer value.
///
/// Built fresh per rendering pass or submission request; the evaluation
/// functions only ever read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        AnswerSet::default()
    }

    /// Normalizes a raw client payload. `null` entries count as absent and are
    /// dropped, scalars become strings, arrays keep their scalar elements, and
    /// nested objects are discarded.
    pub fn from_json(value: &Value) -> AnswerSet {
        let mut set = AnswerSet::new();
        if let Some(map) = value.as_object() {
            for (key, raw) in map {
                if let Some(answer) = AnswerValue::from_json(raw) {
                    set.0.insert(key.clone(), answer);
                }
            }
        }
        set
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AnswerValue) {
        self.0.insert(key.into(), value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (String, AnswerValue)>>(iter: T) -> Self {
        AnswerSet(iter.into_iter().collect())
    }
}
