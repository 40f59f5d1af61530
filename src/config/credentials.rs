use tracing::debug;
use crate::errors::VantageError;

pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Resolve the upstream API key from an explicit flag value or the
/// environment. Resolved once at startup and injected into the gateway
/// constructor.
pub fn resolve_api_key(flag_value: Option<&str>) -> Result<String, VantageError> {
    let key = match flag_value {
        Some(value) => resolve_credential(value),
        None => std::env::var(API_KEY_ENV_VAR).unwrap_or_default(),
    };

    if key.trim().is_empty() {
        return Err(VantageError::Config(format!(
            "No API key provided. Pass --api-key or set {}",
            API_KEY_ENV_VAR
        )));
    }

    Ok(key)
}
