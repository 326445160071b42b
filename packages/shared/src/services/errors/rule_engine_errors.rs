use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleEngineError {
    /// The position string is not a valid FEN the engine can load.
    InvalidPosition(String),
    InvalidSquare(String),
    InvalidPromotion(char),
}

impl fmt::Display for RuleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleEngineError::InvalidPosition(msg) => write!(f, "Invalid position: {}", msg),
            RuleEngineError::InvalidSquare(square) => write!(f, "Invalid square '{}'", square),
            RuleEngineError::InvalidPromotion(piece) => {
                write!(f, "Invalid promotion piece '{}'", piece)
            }
        }
    }
}

impl std::error::Error for RuleEngineError {}
