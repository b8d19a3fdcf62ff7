use serde_json::{Map, Value, json};

use crate::spec::form::FormSpec;
use crate::spec::question::{Question, QuestionType};
use crate::visibility::VisibilityMap;

/// JSON Schema for an answer payload, restricted to currently-visible
/// questions. Hidden questions are omitted entirely so a conforming client
/// cannot submit answers for them.
pub fn generate(spec: &FormSpec, visibility: &VisibilityMap) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for question in &spec.questions {
        if !visibility
            .get(&question.question_key)
            .copied()
            .unwrap_or(true)
        {
            continue;
        }

        properties.insert(question.question_key.clone(), question_schema(question));
        if question.required {
            required.push(Value::String(question.question_key.clone()));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn question_schema(question: &Question) -> Value {
    match question.kind {
        QuestionType::SingleLineText | QuestionType::MultilineText => {
            json!({ "type": "string", "title": question.label })
        }
        QuestionType::SingleSelect => json!({
            "type": "string",
            "title": question.label,
            "enum": question.options,
        }),
        QuestionType::MultipleSelects => json!({
            "type": "array",
            "title": question.label,
            "items": { "type": "string", "enum": question.options },
        }),
        QuestionType::Attachment => json!({
            "type": "array",
            "title": question.label,
            "items": { "type": "string" },
        }),
    }
}
