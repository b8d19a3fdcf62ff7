pub mod form;
pub mod question;
pub mod rules;

pub use form::FormSpec;
pub use question::{Question, QuestionType};
pub use rules::{Condition, ConditionOperator, ConditionalRules, RuleLogic};
