use std::fmt;

use crate::services::errors::rule_engine_errors::RuleEngineError;

#[derive(Debug)]
pub enum TranscriptError {
    /// A recorded move could not be replayed from the preceding position.
    UnplayableMove { index: usize, notation: String },
    RuleEngine(RuleEngineError),
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::UnplayableMove { index, notation } => {
                write!(f, "Move {} ('{}') cannot be replayed", index, notation)
            }
            TranscriptError::RuleEngine(err) => write!(f, "Rule engine error: {}", err),
        }
    }
}

impl std::error::Error for TranscriptError {}

impl From<RuleEngineError> for TranscriptError {
    fn from(err: RuleEngineError) -> Self {
        TranscriptError::RuleEngine(err)
    }
}
