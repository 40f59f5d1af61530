use clap::Parser;
use tracing_subscriber::EnvFilter;

use vantage::cli::{self, Cli, Commands};
use vantage::errors::VantageError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => cli::serve::handle_serve(args).await,
        Commands::Research(args) => cli::research::handle_research(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                VantageError::Config(_) => 2,
                VantageError::Validation(_) => 2,
                VantageError::Upstream { .. } | VantageError::Timeout(_) => 3,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
