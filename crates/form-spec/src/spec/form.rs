use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{SpecError, SpecIssue};
use crate::spec::question::Question;

/// Top-level form definition derived from an Airtable table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormSpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub airtable_base_id: String,
    pub airtable_table_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airtable_table_name: Option<String>,
    pub questions: Vec<Question>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub allow_multiple_submissions: bool,
}

fn default_true() -> bool {
    true
}

impl FormSpec {
    pub fn from_json(raw: &str) -> Result<FormSpec, SpecError> {
        let spec: FormSpec = serde_json::from_str(raw)?;
        Ok(spec)
    }

    pub fn question(&self, key: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.question_key == key)
    }

    /// Structural problems in the definition. An empty result means the form
    /// is safe to publish; issues do not prevent evaluation.
    pub fn issues(&self) -> Vec<SpecIssue> {
        let mut issues = Vec::new();

        if self.questions.is_empty() {
            issues.push(SpecIssue::NoQuestions);
        }

        let mut seen = BTreeSet::new();
        for question in &self.questions {
            if !seen.insert(question.question_key.as_str()) {
                issues.push(SpecIssue::DuplicateKey(question.question_key.clone()));
            }
        }

        let known: BTreeSet<_> = self
            .questions
            .iter()
            .map(|question| question.question_key.as_str())
            .collect();

        for question in &self.questions {
            if question.kind.is_select() && question.options.is_empty() {
                issues.push(SpecIssue::MissingOptions(question.question_key.clone()));
            }

            let Some(rules) = &question.conditional_rules else {
                continue;
            };
            for condition in &rules.conditions {
                if condition.question_key == question.question_key {
                    issues.push(SpecIssue::SelfReference(question.question_key.clone()));
                } else if !known.contains(condition.question_key.as_str()) {
                    issues.push(SpecIssue::UnknownConditionKey {
                        question: question.question_key.clone(),
                        target: condition.question_key.clone(),
                    });
                }
            }
        }

        issues
    }
}
