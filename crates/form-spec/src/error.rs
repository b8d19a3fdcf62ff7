use thiserror::Error;

/// Failure loading a form definition from its JSON source.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to parse form definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Structural problem found in a form definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecIssue {
    #[error("form has no questions")]
    NoQuestions,
    #[error("duplicate question key '{0}'")]
    DuplicateKey(String),
    #[error("select question '{0}' has no options")]
    MissingOptions(String),
    #[error("question '{0}' references itself in its conditional rules")]
    SelfReference(String),
    #[error("question '{question}' has a condition on unknown key '{target}'")]
    UnknownConditionKey { question: String, target: String },
}
