use tracing::info;

use crate::api::models::ReportRequest;
use crate::cli::commands::ResearchArgs;
use crate::cli::serve::gateway_config;
use crate::errors::VantageError;
use crate::llm::anthropic::AnthropicProvider;
use crate::llm::ResearchProvider;
use crate::prompts::build_prompts;
use crate::report::{extract_report, narrative_text, search_queries, validate_report};

/// Headless one-shot: same pipeline as the HTTP handler, report to stdout.
pub async fn handle_research(args: ResearchArgs) -> Result<(), VantageError> {
    let config = gateway_config(&args.gateway)?;
    let provider = AnthropicProvider::new(&config)?;

    let request = ReportRequest {
        query: args.query,
        market: args.market,
        framework: args.framework,
        investment: args.investment,
        region: args.region,
    };
    let prompts = build_prompts(&request)?;

    info!(query = %request.query, model = %config.model, "Running research request");
    let blocks = provider.research(&prompts.system, &prompts.user).await?;

    let searches = search_queries(&blocks);
    for query in &searches {
        info!(query = %query, "Web search performed");
    }

    let report = extract_report(&narrative_text(&blocks))?;
    validate_report(&report, false)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", rendered);

    Ok(())
}
