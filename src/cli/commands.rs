use clap::{Args, Parser, Subcommand};

use crate::config::types::{DEFAULT_MAX_TOKENS, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(name = "vantage", version, about = "Market intelligence research service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Run a single research request and print the report JSON
    Research(ResearchArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[command(flatten)]
    pub gateway: GatewayArgs,

    /// Reject reports that violate the output schema instead of warning
    #[arg(long)]
    pub strict_schema: bool,
}

#[derive(Args, Clone)]
pub struct ResearchArgs {
    /// Industry or product to research
    #[arg(short, long)]
    pub query: String,

    /// Target market (country or segment)
    #[arg(long, default_value = "")]
    pub market: String,

    /// Analysis framework to apply
    #[arg(long, default_value = "")]
    pub framework: String,

    /// Investment range under consideration
    #[arg(long, default_value = "")]
    pub investment: String,

    /// Region to focus the research on
    #[arg(long, default_value = "")]
    pub region: String,

    #[command(flatten)]
    pub gateway: GatewayArgs,

    /// Pretty-print the report JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Clone)]
pub struct GatewayArgs {
    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Maximum output tokens per request
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// API key (or use ANTHROPIC_API_KEY; $VAR references are resolved)
    #[arg(long)]
    pub api_key: Option<String>,
}
