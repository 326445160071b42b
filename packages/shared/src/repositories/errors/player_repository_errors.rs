#[derive(Debug)]
pub enum PlayerRepositoryError {
    NotFound,
    AlreadyExists,
    /// A conditional rating write found a different rating than expected.
    RatingConflict(String),
    Transaction(String),
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for PlayerRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerRepositoryError::NotFound => write!(f, "Player not found"),
            PlayerRepositoryError::AlreadyExists => write!(f, "Player already exists"),
            PlayerRepositoryError::RatingConflict(msg) => write!(f, "Rating conflict: {}", msg),
            PlayerRepositoryError::Transaction(msg) => write!(f, "Transaction error: {}", msg),
            PlayerRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            PlayerRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for PlayerRepositoryError {}
