use tracing::warn;

use crate::answers::{AnswerSet, AnswerValue};
use crate::spec::rules::{Condition, ConditionOperator};

/// Evaluates one condition against the current answers.
///
/// Pure and total: every input produces a boolean, never an error. An absent
/// or null answer satisfies `notEquals` only; every other operator is
/// vacuously false against a missing answer.
pub fn evaluate(condition: &Condition, answers: &AnswerSet) -> bool {
    let Some(answer) = answers.get(&condition.question_key) else {
        return condition.operator == ConditionOperator::NotEquals;
    };

    match &condition.operator {
        ConditionOperator::Equals => answer_equals(answer, condition.value.as_deref()),
        ConditionOperator::NotEquals => !answer_equals(answer, condition.value.as_deref()),
        ConditionOperator::Contains => {
            let needle = condition.value.as_deref().unwrap_or("").to_lowercase();
            answer.to_text().to_lowercase().contains(&needle)
        }
        ConditionOperator::Unknown(op) => {
            warn!(operator = %op, question_key = %condition.question_key, "unknown condition operator");
            false
        }
    }
}

/// Exact, case-sensitive equality. List answers test membership of the
/// operand; no coercion in either direction.
fn answer_equals(answer: &AnswerValue, value: Option<&str>) -> bool {
    match answer {
        AnswerValue::Scalar(text) => Some(text.as_str()) == value,
        AnswerValue::Many(items) => {
            value.is_some_and(|v| items.iter().any(|item| item.as_str() == v))
        }
    }
}
