#![allow(missing_docs)]

pub mod answers;
pub mod answers_schema;
pub mod condition;
pub mod error;
pub mod export;
pub mod render;
pub mod spec;
pub mod submit;
pub mod validate;
pub mod visibility;

pub use answers::{AnswerSet, AnswerValue};
pub use answers_schema::generate as answers_schema;
pub use condition::evaluate;
pub use error::{SpecError, SpecIssue};
pub use export::{ResponseRecord, export_csv, export_json};
pub use render::{
    RenderPayload, RenderProgress, RenderQuestion, RenderStatus, build_render_payload, render_json,
    render_text,
};
pub use spec::{
    Condition, ConditionOperator, ConditionalRules, FormSpec, Question, QuestionType, RuleLogic,
};
pub use submit::{OutboundRecord, SubmissionError, build_record_fields, prepare_submission};
pub use validate::{ValidationError, ValidationResult, validate};
pub use visibility::{VisibilityMap, filter_visible, is_visible, resolve_visibility};
