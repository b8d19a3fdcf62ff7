use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::answers::{AnswerSet, AnswerValue};
use crate::spec::form::FormSpec;
use crate::spec::question::{Question, QuestionType};
use crate::visibility::is_visible;

const SINGLE_LINE_MAX: usize = 500;
const MULTILINE_MAX: usize = 5000;
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_key: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub missing_required: Vec<String>,
    pub unknown_fields: Vec<String>,
}

/// Validates a final answer set against the form, enforcing checks only for
/// questions that are visible under those answers. This is the submit-time
/// call site of the visibility engine; hidden questions are never required
/// and their answers are never option-checked.
pub fn validate(spec: &FormSpec, answers: &AnswerSet) -> ValidationResult {
    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for question in &spec.questions {
        if !is_visible(question.conditional_rules.as_ref(), answers) {
            continue;
        }

        match answers.get(&question.question_key) {
            None => {
                if question.required {
                    missing_required.push(question.question_key.clone());
                }
            }
            Some(answer) if answer.is_empty() => {
                if question.required {
                    missing_required.push(question.question_key.clone());
                }
            }
            Some(answer) => {
                if let Some(error) = validate_value(question, answer) {
                    errors.push(error);
                }
            }
        }
    }

    let known: BTreeSet<_> = spec
        .questions
        .iter()
        .map(|question| question.question_key.as_str())
        .collect();
    let unknown_fields: Vec<String> = answers
        .keys()
        .filter(|key| !known.contains(key))
        .map(String::from)
        .collect();

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

/// Per-field check for one visible, non-empty answer. Shared by the render
/// layer (inline feedback as the user types) and by `validate`.
pub fn validate_value(question: &Question, answer: &AnswerValue) -> Option<ValidationError> {
    match question.kind {
        QuestionType::SingleLineText => {
            let Some(text) = answer.as_scalar() else {
                return Some(type_mismatch(question));
            };
            if text.len() > SINGLE_LINE_MAX {
                return Some(field_error(
                    question,
                    format!("Maximum {} characters allowed", SINGLE_LINE_MAX),
                    "max_length",
                ));
            }
            if question.label.to_lowercase().contains("email")
                && let Ok(regex) = Regex::new(EMAIL_PATTERN)
                && !regex.is_match(text)
            {
                return Some(field_error(
                    question,
                    "Please enter a valid email address".into(),
                    "invalid_email",
                ));
            }
            None
        }
        QuestionType::MultilineText => {
            let Some(text) = answer.as_scalar() else {
                return Some(type_mismatch(question));
            };
            if text.len() > MULTILINE_MAX {
                return Some(field_error(
                    question,
                    format!("Maximum {} characters allowed", MULTILINE_MAX),
                    "max_length",
                ));
            }
            None
        }
        QuestionType::SingleSelect => match answer.as_scalar() {
            Some(text) if question.options.iter().any(|option| option.as_str() == text) => None,
            _ => Some(invalid_option(question)),
        },
        QuestionType::MultipleSelects => {
            // A scalar answer counts as a one-element selection.
            let all_allowed = answer
                .items()
                .into_iter()
                .all(|item| question.options.iter().any(|option| option.as_str() == item));
            if all_allowed {
                None
            } else {
                Some(invalid_option(question))
            }
        }
        // Attachment answers are file names chosen upstream; nothing to check.
        QuestionType::Attachment => None,
    }
}

fn type_mismatch(question: &Question) -> ValidationError {
    field_error(
        question,
        format!("Expected a single value for {}", question.label),
        "type_mismatch",
    )
}

fn invalid_option(question: &Question) -> ValidationError {
    field_error(
        question,
        format!("Invalid option for {}", question.label),
        "invalid_option",
    )
}

fn field_error(question: &Question, message: String, code: &str) -> ValidationError {
    ValidationError {
        question_key: Some(question.question_key.clone()),
        message,
        code: Some(code.into()),
    }
}
