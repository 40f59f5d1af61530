use thiserror::Error;

#[derive(Debug, Error)]
pub enum VantageError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Upstream request timed out: {0}")]
    Timeout(String),

    #[error("No JSON object found in model output")]
    Extraction,

    #[error("Model output is not valid JSON: {reason}")]
    Parse { reason: String, snippet: String },

    #[error("Report failed schema validation: {0}")]
    Schema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
