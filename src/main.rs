mod analyzer;
mod chart;
mod config;
mod model;
mod normalizer;
mod parser;
mod pipeline;
mod scraper;
mod sources;
mod storage;

use chart::ChartOutcome;
use config::load_config_or_default;
use model::AppError;
use scraper::HttpFetcher;
use std::path::Path;
use tracing::{error, info};

const CONFIG_PATH: &str = "config.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config = load_config_or_default(Path::new(CONFIG_PATH))?;
    let fetcher = HttpFetcher::new(&config.sources.user_agent)?;

    info!("🚀 Starting run...");
    match pipeline::run(&config, &fetcher).await {
        Ok(report) => {
            let saved = report
                .charts
                .iter()
                .filter(|c| matches!(c, ChartOutcome::Saved(_)))
                .count();
            info!(
                "Finished: stocks {:?}, crypto {:?}, {} of {} charts saved",
                report.stock_change,
                report.crypto_change,
                saved,
                report.charts.len()
            );
            Ok(())
        }
        Err(e) => {
            error!("Run aborted: {}", e);
            Err(e)
        }
    }
}
