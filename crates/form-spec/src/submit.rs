use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::answers::AnswerSet;
use crate::spec::form::FormSpec;
use crate::validate::{ValidationResult, validate};
use crate::visibility::is_visible;

/// Record payload ready to hand to the Airtable record-creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundRecord {
    pub base_id: String,
    pub table_id: String,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("form is not accepting responses")]
    FormInactive,
    #[error("submission failed validation")]
    Invalid(ValidationResult),
}

/// Selects the answers forwarded to the record store: one entry per visible,
/// answered question, keyed by the Airtable field name (field id fallback).
/// Answers for hidden questions are dropped even if the client sent them.
pub fn build_record_fields(spec: &FormSpec, answers: &AnswerSet) -> Map<String, Value> {
    let mut fields = Map::new();
    for question in &spec.questions {
        if !is_visible(question.conditional_rules.as_ref(), answers) {
            continue;
        }
        if let Some(answer) = answers.get(&question.question_key) {
            fields.insert(question.record_field().to_string(), answer.to_json());
        }
    }
    fields
}

/// Full submit-time pass: refuses inactive forms, re-runs validation over the
/// final answer set, then builds the outgoing record payload.
pub fn prepare_submission(
    spec: &FormSpec,
    answers: &AnswerSet,
) -> Result<OutboundRecord, SubmissionError> {
    if !spec.is_active {
        return Err(SubmissionError::FormInactive);
    }

    let result = validate(spec, answers);
    if !result.valid {
        return Err(SubmissionError::Invalid(result));
    }

    Ok(OutboundRecord {
        base_id: spec.airtable_base_id.clone(),
        table_id: spec.airtable_table_id.clone(),
        fields: build_record_fields(spec, answers),
    })
}
