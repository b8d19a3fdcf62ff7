use serde_json::json;

use form_spec::{
    AnswerSet, FormSpec, RenderStatus, build_render_payload, render_json, render_text,
};

fn fixture(name: &str) -> &'static str {
    match name {
        "contact_form" => include_str!("fixtures/contact_form.json"),
        "event_form" => include_str!("fixtures/event_form.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

#[test]
fn render_text_includes_next_question() {
    let spec: FormSpec = serde_json::from_str(fixture("contact_form")).expect("deserialize");
    let payload = build_render_payload(&spec, &AnswerSet::new());

    assert_eq!(payload.status, RenderStatus::NeedInput);
    assert_eq!(payload.next_question_key.as_deref(), Some("name"));

    let text = render_text(&payload);
    assert!(text.contains("Next question"));
    assert!(text.contains("Visible questions"));
}

#[test]
fn render_marks_complete_once_visible_questions_are_answered() {
    let spec: FormSpec = serde_json::from_str(fixture("contact_form")).expect("deserialize");
    let answers = AnswerSet::from_json(&json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "message": "hello",
    }));
    let payload = build_render_payload(&spec, &answers);
    assert_eq!(payload.status, RenderStatus::Complete);
    assert!(payload.next_question_key.is_none());
    assert_eq!(payload.progress.answered, 3);
    assert_eq!(payload.progress.total, 3);
}

#[test]
fn render_json_exposes_structure() {
    let spec: FormSpec = serde_json::from_str(fixture("event_form")).expect("deserialize");
    let answers = AnswerSet::from_json(&json!({ "attending": "yes" }));
    let payload = build_render_payload(&spec, &answers);

    let ui = render_json(&payload);
    assert_eq!(ui["form_title"], "Team Offsite RSVP");
    assert_eq!(ui["status"], "need_input");
    assert_eq!(ui["next_question_key"], "meal_choice");
    let questions = ui["questions"].as_array().expect("questions array");
    assert!(questions.iter().any(|q| q["questionKey"] == "meal_choice"
        && q["visible"] == json!(true)
        && q["required"] == json!(true)));
}

#[test]
fn hidden_questions_stay_in_payload_but_marked_invisible() {
    let spec: FormSpec = serde_json::from_str(fixture("event_form")).expect("deserialize");
    let payload = build_render_payload(&spec, &AnswerSet::from_json(&json!({ "attending": "no" })));

    let meal = payload
        .questions
        .iter()
        .find(|question| question.question_key == "meal_choice")
        .expect("meal question in payload");
    assert!(!meal.visible);

    // Progress only counts visible questions.
    assert_eq!(payload.progress.total, 1);
    assert_eq!(payload.progress.answered, 1);
    assert_eq!(payload.status, RenderStatus::Complete);
}

#[test]
fn answers_schema_gates_on_visibility() {
    let spec: FormSpec = serde_json::from_str(fixture("event_form")).expect("deserialize");

    let hidden = build_render_payload(&spec, &AnswerSet::new());
    let props = hidden.schema["properties"].as_object().unwrap();
    assert!(props.contains_key("attending"));
    assert!(!props.contains_key("meal_choice"));

    let shown = build_render_payload(&spec, &AnswerSet::from_json(&json!({ "attending": "yes" })));
    let props = shown.schema["properties"].as_object().unwrap();
    assert!(props.contains_key("meal_choice"));
    assert_eq!(
        props["meal_choice"]["enum"],
        json!(["standard", "vegetarian", "vegan"])
    );
    let required = shown.schema["required"].as_array().unwrap();
    assert!(required.contains(&json!("meal_choice")));
}
