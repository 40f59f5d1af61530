use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::warn;

use crate::api::models::ErrorResponse;
use crate::errors::VantageError;

impl IntoResponse for VantageError {
    fn into_response(self) -> axum::response::Response {
        // Diagnostic detail stays server-side; the envelope carries only the
        // client-safe message.
        match &self {
            VantageError::Parse { reason, snippet } => {
                warn!(reason = %reason, snippet = %snippet, "Discarding unparseable report");
            }
            VantageError::Extraction => {
                warn!("Model output contained no JSON object");
            }
            VantageError::Schema(detail) => {
                warn!(detail = %detail, "Report rejected by schema validation");
            }
            VantageError::Upstream { status, message } => {
                warn!(status = %status, message = %message, "Upstream request failed");
            }
            _ => {}
        }

        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(ErrorResponse { error: self.client_message() })).into_response()
    }
}
