use crate::answers::AnswerSet;
use crate::condition;
use crate::spec::form::FormSpec;
use crate::spec::question::Question;
use crate::spec::rules::{ConditionalRules, RuleLogic};

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Decides whether a question carrying `rules` is currently shown.
///
/// A null rule set or an empty condition list short-circuits to visible
/// without consulting the combinator. `Or` requires any condition to hold,
/// `And` (the default) requires all of them.
pub fn is_visible(rules: Option<&ConditionalRules>, answers: &AnswerSet) -> bool {
    let Some(rules) = rules else {
        return true;
    };
    if rules.conditions.is_empty() {
        return true;
    }

    let mut results = rules
        .conditions
        .iter()
        .map(|cond| condition::evaluate(cond, answers));

    match rules.logic {
        RuleLogic::Or => results.any(|result| result),
        RuleLogic::And => results.all(|result| result),
    }
}

/// Ordered sub-sequence of `questions` that are visible under `answers`.
///
/// Recomputed in full on every call; both the render surface and the
/// submission handler go through here so they always agree.
pub fn filter_visible<'a>(questions: &'a [Question], answers: &AnswerSet) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|question| is_visible(question.conditional_rules.as_ref(), answers))
        .collect()
}

/// Visibility of every question in the form, keyed by question key.
pub fn resolve_visibility(spec: &FormSpec, answers: &AnswerSet) -> VisibilityMap {
    spec.questions
        .iter()
        .map(|question| {
            (
                question.question_key.clone(),
                is_visible(question.conditional_rules.as_ref(), answers),
            )
        })
        .collect()
}
