use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::answers::{AnswerSet, AnswerValue};
use crate::spec::form::FormSpec;

/// One stored submission, as mirrored from the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airtable_record_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub answers: AnswerSet,
    /// Set when the mirrored record was deleted upstream; soft-deleted
    /// responses are normally excluded from exports.
    #[serde(default)]
    pub deleted_in_airtable: bool,
}

/// CSV export: one header row (submission id, timestamp, question labels in
/// form order) followed by one row per response. List answers are joined with
/// "; "; absent answers become empty cells.
pub fn export_csv(spec: &FormSpec, responses: &[ResponseRecord]) -> String {
    let mut rows = Vec::with_capacity(responses.len() + 1);

    let mut headers = vec!["Submission ID".to_string(), "Created At".to_string()];
    headers.extend(spec.questions.iter().map(|question| question.label.clone()));
    rows.push(
        headers
            .iter()
            .map(|header| csv_field(header))
            .collect::<Vec<_>>()
            .join(","),
    );

    for response in responses {
        let mut row = vec![
            csv_field(&response.id),
            csv_field(
                &response
                    .submitted_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        ];
        for question in &spec.questions {
            let cell = match response.answers.get(&question.question_key) {
                Some(AnswerValue::Many(items)) => items.join("; "),
                Some(AnswerValue::Scalar(text)) => text.clone(),
                None => String::new(),
            };
            row.push(csv_field(&cell));
        }
        rows.push(row.join(","));
    }

    rows.join("\n")
}

/// JSON export: form header, responses with their answer maps, and an export
/// timestamp.
pub fn export_json(spec: &FormSpec, responses: &[ResponseRecord]) -> Value {
    json!({
        "form": {
            "title": spec.title,
            "description": spec.description,
        },
        "responses": responses
            .iter()
            .map(|response| json!({
                "id": response.id,
                "submittedAt": response
                    .submitted_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                "answers": response.answers,
            }))
            .collect::<Vec<_>>(),
        "exportedAt": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
