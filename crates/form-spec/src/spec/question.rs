use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::rules::ConditionalRules;

/// Field kinds supported when deriving a form from an Airtable table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    SingleLineText,
    MultilineText,
    SingleSelect,
    MultipleSelects,
    Attachment,
}

impl QuestionType {
    /// Select kinds carry an `options` list and get membership checks on submit.
    pub fn is_select(&self) -> bool {
        matches!(
            self,
            QuestionType::SingleSelect | QuestionType::MultipleSelects
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleLineText => "singleLineText",
            QuestionType::MultilineText => "multilineText",
            QuestionType::SingleSelect => "singleSelect",
            QuestionType::MultipleSelects => "multipleSelects",
            QuestionType::Attachment => "attachment",
        }
    }
}

/// A single form field definition, mapped onto one Airtable table field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable identifier, unique within a form; answers are keyed by it.
    pub question_key: String,
    pub airtable_field_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airtable_field_name: Option<String>,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// `None` means "always visible".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_rules: Option<ConditionalRules>,
    #[serde(default)]
    pub order: i64,
}

impl Question {
    /// Column the answer is forwarded under when creating an Airtable record.
    /// Field names are preferred; the field id is the fallback.
    pub fn record_field(&self) -> &str {
        self.airtable_field_name
            .as_deref()
            .unwrap_or(&self.airtable_field_id)
    }
}
