use thiserror::Error;

#[derive(Debug, Error)]
pub enum OncomatchError {
    #[error("No constructor registered for rule: {0}")]
    UnknownRule(String),

    #[error("Invalid parameters for rule {rule}: {reason}")]
    InvalidParameters { rule: String, reason: String },

    #[error("Gene role {role} does not support {lookup} lookups")]
    UnsupportedGeneRole { role: String, lookup: String },

    #[error("Invalid ICD code: {0}")]
    InvalidIcdCode(String),

    #[error("Invalid background statistics: {0}")]
    InvalidBackground(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OncomatchError {
    pub fn invalid_parameters(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        OncomatchError::InvalidParameters {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OncomatchError>;
