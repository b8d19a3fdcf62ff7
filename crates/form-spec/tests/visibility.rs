use serde_json::json;

use form_spec::{
    AnswerSet, AnswerValue, Condition, ConditionOperator, ConditionalRules, FormSpec, Question,
    QuestionType, RuleLogic, build_record_fields, evaluate, filter_visible, is_visible,
    resolve_visibility, validate,
};

fn question(key: &str, rules: Option<ConditionalRules>) -> Question {
    Question {
        question_key: key.into(),
        airtable_field_id: format!("fld_{key}"),
        airtable_field_name: None,
        label: key.to_uppercase(),
        kind: QuestionType::SingleLineText,
        required: false,
        options: vec![],
        conditional_rules: rules,
        order: 0,
    }
}

fn condition(key: &str, operator: ConditionOperator, value: &str) -> Condition {
    Condition {
        question_key: key.into(),
        operator,
        value: Some(value.into()),
    }
}

fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), AnswerValue::from(*value)))
        .collect()
}

#[test]
fn null_rules_and_empty_conditions_are_always_visible() {
    let empty = ConditionalRules::default();
    let any = answers(&[("q1", "whatever")]);
    assert!(is_visible(None, &any));
    assert!(is_visible(Some(&empty), &any));
    assert!(is_visible(None, &AnswerSet::new()));
}

#[test]
fn and_logic_requires_every_condition() {
    let rules = ConditionalRules {
        logic: RuleLogic::And,
        conditions: vec![
            condition("q1", ConditionOperator::Equals, "yes"),
            condition("q2", ConditionOperator::Equals, "b"),
        ],
    };
    assert!(is_visible(
        Some(&rules),
        &answers(&[("q1", "yes"), ("q2", "b")])
    ));
    assert!(!is_visible(
        Some(&rules),
        &answers(&[("q1", "yes"), ("q2", "c")])
    ));
    assert!(!is_visible(Some(&rules), &answers(&[("q1", "yes")])));
}

#[test]
fn or_logic_requires_any_condition() {
    let rules = ConditionalRules {
        logic: RuleLogic::Or,
        conditions: vec![
            condition("q1", ConditionOperator::Equals, "a"),
            condition("q1", ConditionOperator::Equals, "b"),
        ],
    };
    assert!(is_visible(Some(&rules), &answers(&[("q1", "a")])));
    assert!(is_visible(Some(&rules), &answers(&[("q1", "b")])));
    assert!(!is_visible(Some(&rules), &answers(&[("q1", "c")])));
    assert!(!is_visible(Some(&rules), &AnswerSet::new()));
}

#[test]
fn equals_and_not_equals_are_exact_complements_for_present_answers() {
    let cases: &[(AnswerValue, &str)] = &[
        (AnswerValue::from("x"), "x"),
        (AnswerValue::from("x"), "y"),
        (AnswerValue::Many(vec!["x".into(), "y".into()]), "x"),
        (AnswerValue::Many(vec!["x".into(), "y".into()]), "z"),
        (AnswerValue::from(""), ""),
    ];
    for (answer, operand) in cases {
        let mut set = AnswerSet::new();
        set.insert("q", answer.clone());
        let eq = evaluate(&condition("q", ConditionOperator::Equals, operand), &set);
        let ne = evaluate(&condition("q", ConditionOperator::NotEquals, operand), &set);
        assert_ne!(eq, ne, "answer {answer:?} operand {operand:?}");
    }
}

#[test]
fn conditional_question_shows_only_when_answer_matches() {
    // Q2 visible iff q1 == "yes".
    let rules = ConditionalRules {
        logic: RuleLogic::And,
        conditions: vec![condition("q1", ConditionOperator::Equals, "yes")],
    };
    assert!(is_visible(Some(&rules), &answers(&[("q1", "yes")])));
    assert!(!is_visible(Some(&rules), &answers(&[("q1", "no")])));
    assert!(!is_visible(Some(&rules), &AnswerSet::new()));
}

#[test]
fn not_equals_on_list_answer_checks_membership() {
    let mut set = AnswerSet::new();
    set.insert("q", AnswerValue::Many(vec!["x".into(), "y".into()]));
    assert!(!evaluate(
        &condition("q", ConditionOperator::NotEquals, "x"),
        &set
    ));
    assert!(evaluate(
        &condition("q", ConditionOperator::NotEquals, "z"),
        &set
    ));
}

#[test]
fn unknown_operator_hides_the_question_but_does_not_panic() {
    let rules = ConditionalRules {
        logic: RuleLogic::And,
        conditions: vec![condition(
            "q1",
            ConditionOperator::Unknown("greaterThan".into()),
            "3",
        )],
    };
    assert!(!is_visible(Some(&rules), &answers(&[("q1", "5")])));
}

#[test]
fn filter_visible_preserves_order_and_is_idempotent() {
    let show_rules = ConditionalRules {
        logic: RuleLogic::And,
        conditions: vec![condition("gate", ConditionOperator::Equals, "open")],
    };
    let questions = vec![
        question("gate", None),
        question("a", Some(show_rules.clone())),
        question("b", None),
        question("c", Some(show_rules)),
    ];
    let set = answers(&[("gate", "open")]);

    let first: Vec<_> = filter_visible(&questions, &set)
        .iter()
        .map(|q| q.question_key.clone())
        .collect();
    let second: Vec<_> = filter_visible(&questions, &set)
        .iter()
        .map(|q| q.question_key.clone())
        .collect();
    assert_eq!(first, vec!["gate", "a", "b", "c"]);
    assert_eq!(first, second);

    let closed: Vec<_> = filter_visible(&questions, &answers(&[("gate", "shut")]))
        .iter()
        .map(|q| q.question_key.clone())
        .collect();
    assert_eq!(closed, vec!["gate", "b"]);
}

#[test]
fn render_and_submit_call_sites_agree() {
    let spec: FormSpec = serde_json::from_str(include_str!("fixtures/event_form.json")).unwrap();
    let set = AnswerSet::from_json(&json!({
        "attending": "yes",
        "meal_choice": "vegan",
        "allergy_details": "peanuts",
        "workshops": ["sailing"],
    }));

    let visibility = resolve_visibility(&spec, &set);
    let visible: Vec<_> = filter_visible(&spec.questions, &set)
        .iter()
        .map(|q| q.question_key.clone())
        .collect();

    // The map-shaped and list-shaped surfaces are two views of one decision.
    for question in &spec.questions {
        assert_eq!(
            visibility[&question.question_key],
            visible.contains(&question.question_key)
        );
    }

    // Submit-side selection forwards exactly the visible, answered questions.
    let fields = build_record_fields(&spec, &set);
    assert_eq!(fields.len(), 4);
    assert_eq!(fields["Attending"], json!("yes"));
    assert_eq!(fields["Meal"], json!("vegan"));
    assert_eq!(fields["fldAllergy01"], json!("peanuts"));
    assert_eq!(fields["Workshops"], json!(["sailing"]));

    // And validation enforces requirements over the same visible set.
    assert!(validate(&spec, &set).valid);
}

#[test]
fn hidden_answers_are_not_forwarded() {
    let spec: FormSpec = serde_json::from_str(include_str!("fixtures/event_form.json")).unwrap();
    // Not attending: meal/allergy/workshops are all hidden, even though the
    // client smuggled a meal answer in.
    let set = AnswerSet::from_json(&json!({
        "attending": "no",
        "meal_choice": "vegan",
    }));

    let fields = build_record_fields(&spec, &set);
    assert_eq!(fields.len(), 1);
    assert!(fields.contains_key("Attending"));
}

#[test]
fn rules_decoded_without_conditions_mean_always_visible() {
    let rules: ConditionalRules = serde_json::from_str(r#"{ "logic": "AND" }"#).unwrap();
    assert!(is_visible(Some(&rules), &AnswerSet::new()));
}
