use serde::Deserialize;
use serde_json::Value;

/// Server-side web search tool, executed by the upstream provider.
pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
pub const WEB_SEARCH_TOOL_NAME: &str = "web_search";

/// One element of the upstream response content sequence, dispatched on the
/// `type` discriminant. Block kinds we do not consume (tool results, citation
/// records) fall into the catch-all variant and are skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "server_tool_use")]
    ServerToolUse {
        name: String,
        #[serde(default)]
        input: Value,
    },

    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}
