use super::types::VantageError;

impl VantageError {
    /// HTTP status this error maps to. Upstream failures pass their status
    /// through unchanged; extraction, parse and schema failures are internal.
    pub fn http_status(&self) -> u16 {
        match self {
            VantageError::Validation(_) => 400,
            VantageError::Upstream { status, .. } => *status,
            VantageError::Timeout(_) => 504,
            VantageError::Extraction
            | VantageError::Parse { .. }
            | VantageError::Schema(_) => 500,
            VantageError::Config(_)
            | VantageError::Io(_)
            | VantageError::Json(_)
            | VantageError::Internal(_) => 500,
        }
    }

    /// Message safe to place in the client-visible error envelope. Raw model
    /// output never leaves the server; extraction diagnostics stay in logs.
    pub fn client_message(&self) -> String {
        match self {
            VantageError::Extraction | VantageError::Parse { .. } => {
                "Could not parse report data".to_string()
            }
            VantageError::Schema(_) => "Report failed validation".to_string(),
            VantageError::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
