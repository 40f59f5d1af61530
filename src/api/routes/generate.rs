use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::models::{ErrorResponse, GenerateResponse, ReportRequest};
use crate::api::AppState;
use crate::errors::VantageError;
use crate::llm::ResearchProvider;
use crate::prompts::build_prompts;
use crate::report::{extract_report, narrative_text, search_queries, validate_report};

/// One request, one upstream call: validate, dispatch, extract, respond.
pub async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<GenerateResponse>, VantageError> {
    let prompts = build_prompts(&request)?;

    let request_id = Uuid::new_v4();
    info!(
        request_id = %request_id,
        query = %request.query,
        market = %request.market,
        model = state.provider.model_name(),
        "Dispatching research request"
    );

    let blocks = state.provider.research(&prompts.system, &prompts.user).await?;

    let searches = search_queries(&blocks);
    debug!(
        request_id = %request_id,
        blocks = blocks.len(),
        searches = searches.len(),
        "Upstream response received"
    );

    let report = extract_report(&narrative_text(&blocks))?;
    validate_report(&report, state.strict_schema)?;

    info!(request_id = %request_id, searches = searches.len(), "Report generated");
    Ok(Json(GenerateResponse { report, searches }))
}

/// The CORS layer decorates this with the cross-origin headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse { error: "Method not allowed".to_string() }),
    )
}
