use serde_json::{Map, Value, json};

use crate::answers::{AnswerSet, AnswerValue};
use crate::answers_schema;
use crate::spec::form::FormSpec;
use crate::spec::question::QuestionType;
use crate::visibility::resolve_visibility;

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// More input is required.
    NeedInput,
    /// All visible questions are filled.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Progress counters over visible questions.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes a single question for render outputs.
#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub question_key: String,
    pub label: String,
    pub kind: QuestionType,
    pub required: bool,
    pub visible: bool,
    pub options: Vec<String>,
    pub current_value: Option<AnswerValue>,
}

/// Collected payload used by both the text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub form_title: String,
    pub status: RenderStatus,
    pub next_question_key: Option<String>,
    pub progress: RenderProgress,
    pub help: Option<String>,
    pub questions: Vec<RenderQuestion>,
    pub schema: Value,
}

/// Builds the render-time view of the form. This is the render-loop call site
/// of the visibility engine: it is re-run from scratch whenever an answer
/// changes, and its visibility decisions match the submit path exactly.
pub fn build_render_payload(spec: &FormSpec, answers: &AnswerSet) -> RenderPayload {
    let visibility = resolve_visibility(spec, answers);

    let questions = spec
        .questions
        .iter()
        .map(|question| RenderQuestion {
            question_key: question.question_key.clone(),
            label: question.label.clone(),
            kind: question.kind,
            required: question.required,
            visible: visibility
                .get(&question.question_key)
                .copied()
                .unwrap_or(true),
            options: question.options.clone(),
            current_value: answers.get(&question.question_key).cloned(),
        })
        .collect::<Vec<_>>();

    let next_question_key = questions
        .iter()
        .find(|question| {
            question.visible
                && question
                    .current_value
                    .as_ref()
                    .is_none_or(AnswerValue::is_empty)
        })
        .map(|question| question.question_key.clone());

    let answered = questions
        .iter()
        .filter(|question| {
            question.visible
                && question
                    .current_value
                    .as_ref()
                    .is_some_and(|value| !value.is_empty())
        })
        .count();
    let total = visibility.values().filter(|visible| **visible).count();

    let status = if next_question_key.is_some() {
        RenderStatus::NeedInput
    } else {
        RenderStatus::Complete
    };

    RenderPayload {
        form_title: spec.title.clone(),
        status,
        next_question_key,
        progress: RenderProgress { answered, total },
        help: spec.description.clone(),
        questions,
        schema: answers_schema::generate(spec, &visibility),
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json(payload: &RenderPayload) -> Value {
    let questions = payload
        .questions
        .iter()
        .map(|question| {
            let mut map = Map::new();
            map.insert(
                "questionKey".into(),
                Value::String(question.question_key.clone()),
            );
            map.insert("label".into(), Value::String(question.label.clone()));
            map.insert(
                "type".into(),
                Value::String(question.kind.as_str().to_string()),
            );
            map.insert("required".into(), Value::Bool(question.required));
            map.insert("visible".into(), Value::Bool(question.visible));
            if !question.options.is_empty() {
                map.insert(
                    "options".into(),
                    Value::Array(
                        question
                            .options
                            .iter()
                            .map(|option| Value::String(option.clone()))
                            .collect(),
                    ),
                );
            }
            if let Some(value) = &question.current_value {
                map.insert("currentValue".into(), value.to_json());
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "form_title": payload.form_title,
        "status": payload.status.as_str(),
        "next_question_key": payload.next_question_key,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "help": payload.help,
        "questions": questions,
        "schema": payload.schema,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {}", payload.form_title));
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));
    if let Some(help) = &payload.help {
        lines.push(format!("Help: {}", help));
    }

    if let Some(next_key) = &payload.next_question_key {
        lines.push(format!("Next question: {}", next_key));
        if let Some(question) = payload
            .questions
            .iter()
            .find(|question| &question.question_key == next_key)
        {
            lines.push(format!("  Label: {}", question.label));
            if question.required {
                lines.push("  Required: yes".to_string());
            }
            if !question.options.is_empty() {
                lines.push(format!("  Options: {}", question.options.join(", ")));
            }
        }
    } else {
        lines.push("All visible questions are answered.".to_string());
    }

    lines.push("Visible questions:".to_string());
    for question in payload.questions.iter().filter(|question| question.visible) {
        let mut entry = format!(" - {} ({})", question.question_key, question.label);
        if question.required {
            entry.push_str(" [required]");
        }
        if let Some(value) = &question.current_value {
            entry.push_str(&format!(" = {}", value.to_text()));
        }
        lines.push(entry);
    }

    lines.join("\n")
}
