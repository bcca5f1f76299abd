//! Marketlens CLI
//!
//! Fetches one symbol from Alpha Vantage and writes the price series with
//! its indicators as CSV.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use marketlens::config::ProviderConfig;
use marketlens::export::{write_report_csv, write_report_csv_to_path};
use marketlens::logging;
use marketlens::models::indicators::{
    IndicatorParams, DEFAULT_BOLLINGER_K, DEFAULT_BOLLINGER_WINDOW, DEFAULT_MA_WINDOW,
    DEFAULT_RSI_PERIOD,
};
use marketlens::models::request::{Interval, PriceRequest};
use marketlens::services::alpha_vantage::AlphaVantageProvider;
use marketlens::services::AnalysisService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "marketlens",
    version,
    about = "Fetch equity prices and derive moving average, RSI and Bollinger bands"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    indicators: IndicatorArgs,

    /// Write CSV to this file instead of stdout
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest intraday bars
    Intraday {
        symbol: String,
        /// Bar spacing: 1min, 5min, 15min, 30min or 60min
        #[arg(long, default_value = "5min")]
        interval: Interval,
    },
    /// Daily bars between two dates (inclusive)
    Historical {
        symbol: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
}

#[derive(Args)]
struct IndicatorArgs {
    #[arg(long, global = true, default_value_t = DEFAULT_MA_WINDOW)]
    ma_window: usize,
    #[arg(long, global = true, default_value_t = DEFAULT_RSI_PERIOD)]
    rsi_period: usize,
    #[arg(long, global = true, default_value_t = DEFAULT_BOLLINGER_WINDOW)]
    bollinger_window: usize,
    #[arg(long, global = true, default_value_t = DEFAULT_BOLLINGER_K)]
    bollinger_k: f64,
}

impl From<&IndicatorArgs> for IndicatorParams {
    fn from(args: &IndicatorArgs) -> Self {
        IndicatorParams {
            ma_window: args.ma_window,
            rsi_period: args.rsi_period,
            bollinger_window: args.bollinger_window,
            bollinger_k: args.bollinger_k,
        }
    }
}

impl Cli {
    fn request(&self) -> PriceRequest {
        match &self.command {
            Commands::Intraday { symbol, interval } => PriceRequest::intraday(symbol, *interval),
            Commands::Historical { symbol, start, end } => {
                PriceRequest::historical(symbol, *start, *end)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let request = cli.request();

    let provider = AlphaVantageProvider::new(ProviderConfig::from_env()?);
    let service = AnalysisService::new(Arc::new(provider));
    let report = service
        .analyze(&request, IndicatorParams::from(&cli.indicators))
        .await?;

    match &cli.output {
        Some(path) => {
            write_report_csv_to_path(&report, path)?;
            info!(path = %path.display(), rows = report.len(), "Wrote indicator CSV");
        }
        None => write_report_csv(&report, std::io::stdout().lock())?,
    }

    Ok(())
}
