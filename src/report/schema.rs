use std::sync::LazyLock;

use serde_json::{json, Value};
use tracing::warn;

use crate::errors::VantageError;

pub static REPORT_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": [
            "title", "executive_summary", "market_sizing", "competitors",
            "porters_five", "swot", "macro_data", "regulatory",
            "recommendation", "sources"
        ],
        "properties": {
            "title": { "type": "string" },
            "executive_summary": {
                "type": "object",
                "required": ["headline", "body"],
                "properties": {
                    "headline": { "type": "string" },
                    "body": { "type": "string" }
                }
            },
            "market_sizing": {
                "type": "object",
                "required": ["tam", "sam", "som", "methodology"],
                "properties": {
                    "tam": { "$ref": "#/$defs/sizing_tier" },
                    "sam": { "$ref": "#/$defs/sizing_tier" },
                    "som": { "$ref": "#/$defs/sizing_tier" },
                    "methodology": { "type": "string" }
                }
            },
            "competitors": {
                "type": "array",
                "minItems": 5,
                "maxItems": 5,
                "items": {
                    "type": "object",
                    "required": ["name", "share", "description", "color"],
                    "properties": {
                        "name": { "type": "string" },
                        "share": { "type": "number", "minimum": 0, "maximum": 100 },
                        "description": { "type": "string" },
                        "color": { "type": "string" }
                    }
                }
            },
            "porters_five": {
                "type": "object",
                "required": ["rivalry", "buyer_power", "supplier_power", "new_entrants", "substitutes"],
                "properties": {
                    "rivalry": { "$ref": "#/$defs/force" },
                    "buyer_power": { "$ref": "#/$defs/force" },
                    "supplier_power": { "$ref": "#/$defs/force" },
                    "new_entrants": { "$ref": "#/$defs/force" },
                    "substitutes": { "$ref": "#/$defs/force" }
                }
            },
            "swot": {
                "type": "object",
                "required": ["strengths", "weaknesses", "opportunities", "threats"],
                "properties": {
                    "strengths": { "$ref": "#/$defs/points" },
                    "weaknesses": { "$ref": "#/$defs/points" },
                    "opportunities": { "$ref": "#/$defs/points" },
                    "threats": { "$ref": "#/$defs/points" }
                }
            },
            "macro_data": {
                "type": "object",
                "required": ["currency_rate", "inflation", "gdp_growth", "consumer_confidence"],
                "properties": {
                    "currency_rate": { "$ref": "#/$defs/indicator" },
                    "inflation": { "$ref": "#/$defs/indicator" },
                    "gdp_growth": { "$ref": "#/$defs/indicator" },
                    "consumer_confidence": { "$ref": "#/$defs/indicator" }
                }
            },
            "regulatory": {
                "type": "object",
                "required": ["registration_time", "import_duty", "vat_rate", "key_agency", "notes"],
                "properties": {
                    "registration_time": { "type": "string" },
                    "import_duty": { "type": "string" },
                    "vat_rate": { "type": "string" },
                    "key_agency": { "type": "string" },
                    "notes": { "type": "string" }
                }
            },
            "recommendation": {
                "type": "object",
                "required": ["verdict", "headline", "body", "payback_period", "expected_margin"],
                "properties": {
                    "verdict": { "type": "string" },
                    "headline": { "type": "string" },
                    "body": { "type": "string" },
                    "payback_period": { "type": "string" },
                    "expected_margin": { "type": "string" }
                }
            },
            "sources": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "type", "description", "date"],
                    "properties": {
                        "name": { "type": "string" },
                        "type": { "type": "string" },
                        "description": { "type": "string" },
                        "date": { "type": "string" }
                    }
                }
            }
        },
        "$defs": {
            "sizing_tier": {
                "type": "object",
                "required": ["value", "label", "description"],
                "properties": {
                    "value": { "type": "string" },
                    "label": { "type": "string" },
                    "description": { "type": "string" }
                }
            },
            "force": {
                "type": "object",
                "required": ["score", "level", "explanation"],
                "properties": {
                    "score": { "type": "number" },
                    "level": { "type": "string" },
                    "explanation": { "type": "string" }
                }
            },
            "points": {
                "type": "array",
                "items": { "type": "string" }
            },
            "indicator": {
                "type": "object",
                "required": ["label", "value", "status"],
                "properties": {
                    "label": { "type": "string" },
                    "value": { "type": "string" },
                    "status": { "type": "string" }
                }
            }
        }
    })
});

/// Validate an extracted report against the output contract. Violations are
/// logged as warnings; under `strict` they abort the request instead.
pub fn validate_report(report: &Value, strict: bool) -> Result<(), VantageError> {
    let compiled = jsonschema::JSONSchema::compile(&REPORT_SCHEMA)
        .map_err(|e| VantageError::Internal(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(report) {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();

        if strict {
            return Err(VantageError::Schema(messages.join("; ")));
        }
        for msg in &messages {
            warn!(validation_error = %msg, "Report schema warning");
        }
    }

    Ok(())
}
