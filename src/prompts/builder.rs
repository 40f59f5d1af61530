use crate::api::models::ReportRequest;
use crate::errors::VantageError;

/// System and user prompt for one research exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// The output contract embedded in the system prompt. The upstream model must
/// answer with a single JSON object of exactly this shape.
const SYSTEM_TEMPLATE: &str = r#"You are a senior strategy consultant producing a market intelligence report. You must search the web extensively to find REAL data for this report. Do NOT make up numbers — search for actual statistics, companies, and market data.

RESEARCH TASK:
- Industry/Product: {{QUERY}}
- Target Market: {{MARKET}}
- Analysis Framework: {{FRAMEWORK}}
- Investment Range: {{INVESTMENT}}
- Focus Region: {{REGION}}

INSTRUCTIONS:
1. Search the web thoroughly for real market data, real companies, real statistics
2. Find actual import/export data, real competitor names, real regulatory requirements
3. Use real macro-economic data for the target market
4. Cite actual sources where possible

Respond ONLY with a valid JSON object (no markdown, no backticks, no preamble). The JSON must have this exact structure:

{
  "title": "Report title",
  "executive_summary": {
    "headline": "One-line market thesis",
    "body": "3-4 sentence executive summary with real data points"
  },
  "market_sizing": {
    "tam": { "value": "$X.XB", "label": "Total Addressable Market", "description": "What this includes" },
    "sam": { "value": "$XXXM", "label": "Serviceable Addressable Market", "description": "Filtered segment" },
    "som": { "value": "$XXM", "label": "Serviceable Obtainable Market", "description": "Realistic capture" },
    "methodology": "How these numbers were derived, citing real sources"
  },
  "competitors": [
    { "name": "Real Company Name", "share": 28, "description": "Brief description", "color": "green" },
    { "name": "Real Company Name", "share": 22, "description": "Brief description", "color": "blue" },
    { "name": "Real Company Name", "share": 18, "description": "Brief description", "color": "amber" },
    { "name": "Real Company Name", "share": 15, "description": "Brief description", "color": "purple" },
    { "name": "Others / Local", "share": 17, "description": "Fragmented local market", "color": "muted" }
  ],
  "porters_five": {
    "rivalry": { "score": 8.2, "level": "high", "explanation": "Why" },
    "buyer_power": { "score": 6.5, "level": "med", "explanation": "Why" },
    "supplier_power": { "score": 4.1, "level": "low", "explanation": "Why" },
    "new_entrants": { "score": 7.0, "level": "med", "explanation": "Why" },
    "substitutes": { "score": 8.8, "level": "high", "explanation": "Why" }
  },
  "swot": {
    "strengths": ["point 1", "point 2", "point 3"],
    "weaknesses": ["point 1", "point 2", "point 3"],
    "opportunities": ["point 1", "point 2", "point 3"],
    "threats": ["point 1", "point 2", "point 3"]
  },
  "macro_data": {
    "currency_rate": { "label": "USD/Local Rate", "value": "real value", "status": "red" },
    "inflation": { "label": "Inflation (YoY)", "value": "real value", "status": "amber" },
    "gdp_growth": { "label": "GDP Growth", "value": "real value", "status": "green" },
    "consumer_confidence": { "label": "Consumer Confidence", "value": "real value", "status": "amber" }
  },
  "regulatory": {
    "registration_time": "6-12 months",
    "import_duty": "20%",
    "vat_rate": "7.5%",
    "key_agency": "Name of the regulator",
    "notes": "Key regulatory considerations"
  },
  "recommendation": {
    "verdict": "Proceed / Proceed with Caution / Do Not Proceed",
    "headline": "One-line recommendation",
    "body": "Detailed phased recommendation with specific investment allocations",
    "payback_period": "24-36 months",
    "expected_margin": "35-45%"
  },
  "sources": [
    { "name": "Source Name", "type": "icon", "description": "What data was used", "date": "2025" }
  ]
}

IMPORTANT: Return ONLY the JSON. No other text."#;

const USER_TEMPLATE: &str = "Research and compile a comprehensive market intelligence report for: \"{{QUERY}}\" in {{MARKET}}. Search the web extensively for real, current data. Focus on {{REGION}}. Investment range: {{INVESTMENT}}. Use the {{FRAMEWORK}} framework. Perform at least 5 different web searches to gather comprehensive data.";

/// Replace {{VARIABLE}} placeholders with request fields.
fn interpolate(template: &str, request: &ReportRequest) -> String {
    let replacements: &[(&str, &str)] = &[
        ("{{QUERY}}", &request.query),
        ("{{MARKET}}", &request.market),
        ("{{FRAMEWORK}}", &request.framework),
        ("{{INVESTMENT}}", &request.investment),
        ("{{REGION}}", &request.region),
    ];

    let mut result = template.to_string();
    for (placeholder, value) in replacements {
        result = result.replace(placeholder, value);
    }
    result
}

/// Build the system and user prompt for a research request. Deterministic,
/// no I/O. Only `query` is required; the remaining fields pass through
/// verbatim even when empty.
pub fn build_prompts(request: &ReportRequest) -> Result<PromptPair, VantageError> {
    if request.query.trim().is_empty() {
        return Err(VantageError::Validation(
            "'query' must not be empty".to_string(),
        ));
    }

    Ok(PromptPair {
        system: interpolate(SYSTEM_TEMPLATE, request),
        user: interpolate(USER_TEMPLATE, request),
    })
}
