use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One research request. Only `query` is required to be non-empty; the other
/// fields default to empty strings and flow into the prompts verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub framework: String,
    #[serde(default)]
    pub investment: String,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub report: Value,
    pub searches: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
