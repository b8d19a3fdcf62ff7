use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Comparison applied by a single condition.
///
/// The set of operators is closed; anything else seen on the wire is kept as
/// `Unknown` so the evaluator can report it instead of failing the decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    Unknown(String),
}

impl ConditionOperator {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "notEquals",
            ConditionOperator::Contains => "contains",
            ConditionOperator::Unknown(raw) => raw,
        }
    }
}

impl Serialize for ConditionOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConditionOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "equals" => ConditionOperator::Equals,
            "notEquals" => ConditionOperator::NotEquals,
            "contains" => ConditionOperator::Contains,
            _ => ConditionOperator::Unknown(raw),
        })
    }
}

/// Combinator for a rule set. Any unrecognized wire value falls back to `And`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleLogic {
    #[default]
    And,
    Or,
}

impl RuleLogic {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleLogic::And => "AND",
            RuleLogic::Or => "OR",
        }
    }
}

impl Serialize for RuleLogic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleLogic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "OR" => RuleLogic::Or,
            _ => RuleLogic::And,
        })
    }
}

/// One comparison against the current answer set.
///
/// `question_key` names the answer being tested, which is usually a different
/// question than the one carrying the rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub question_key: String,
    #[schemars(with = "String")]
    pub operator: ConditionOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Conditional-display configuration attached to a question.
///
/// A missing `conditions` array deserializes to an empty one, which the
/// visibility engine treats as "always visible".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConditionalRules {
    #[serde(default)]
    #[schemars(with = "String")]
    pub logic: RuleLogic,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}
