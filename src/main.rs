use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stock_pipeline::{
    config::Config,
    db::ensure_schema,
    logging::{LogConfig, init_logging},
    scheduler::{Schedule, TaskGraph, run_once, serve},
    services::StockPipeline,
};

#[derive(Debug, Parser)]
#[command(version, about = "Fetch intraday stock quotes and store them in PostgreSQL")]
struct Cli {
    /// Ticker symbol, overrides STOCK_SYMBOL
    #[arg(long, global = true)]
    symbol: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the pipeline once
    Run,
    /// Run the pipeline every hour until interrupted
    Serve,
    /// Create the stock_data table if it does not exist
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging(LogConfig::from_env())?;

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(symbol) = cli.symbol {
        config = config.with_symbol(symbol)?;
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::InitDb => ensure_schema(config.database()).await?,
        Command::Run => {
            let graph = build_graph(&config)?;
            run_once(&graph).await?;
        }
        Command::Serve => {
            let graph = build_graph(&config)?;
            serve(graph, Schedule::hourly()).await?;
        }
    }

    Ok(())
}

fn build_graph(config: &Config) -> Result<TaskGraph> {
    let pipeline = StockPipeline::from_config(config)?;
    Ok(TaskGraph::stock_data_pipeline(
        Arc::new(pipeline),
        *config.retry(),
    ))
}
