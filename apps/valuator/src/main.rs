mod config;
mod main_lib;
mod request;

use std::path::PathBuf;

use clap::Parser;
use config::Config;
use main_lib::{init_tracing, run_valuation};
use request::load_request;

#[derive(Parser)]
#[command(name = "resellbot-valuator")]
#[command(about = "Estimate the resale value of one secondhand item")]
struct Cli {
    /// JSON file with the product and the data the valuation methods use
    request: PathBuf,

    /// Holding period in days for the sales-history prediction
    #[arg(long)]
    target_days: Option<i64>,

    /// Print the result as indented JSON
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    init_tracing(&config.log_format);

    if let Some(days) = cli.target_days.filter(|d| *d > 0) {
        config.target_days = days;
    }

    let request = load_request(&cli.request)?;
    tracing::info!(
        "Valuing product {} ('{}')",
        request.product.product_id,
        request.product.title
    );

    let output = run_valuation(&config, &request).await?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}
