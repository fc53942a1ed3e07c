// Fixed run order: load, analyze, compare, persist, chart.
use crate::analyzer::stats::STAT_COLUMNS;
use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::chart::{ChartOutcome, ChartRenderer};
use crate::config::AppConfig;
use crate::model::{AppError, Table};
use crate::scraper::Fetcher;
use crate::sources;
use crate::storage::{ChangeStatus, detect_change, save_table};
use tracing::info;

#[derive(Debug)]
pub struct RunReport {
    pub stock_change: ChangeStatus,
    pub crypto_change: ChangeStatus,
    /// Weather, stocks, crypto, news, COVID-19, in that order.
    pub charts: Vec<ChartOutcome>,
}

/// Runs every step once. Any fetch, markup, I/O or drawing failure aborts the run.
///
/// Change detection for a file happens before that file is rewritten, so it
/// compares against the previous run's output.
pub async fn run(config: &AppConfig, fetcher: &dyn Fetcher) -> Result<RunReport, AppError> {
    info!("Loading datasets...");
    let weather = sources::load_weather()?;
    let stocks = sources::load_stocks(fetcher, &config.sources).await?;
    let crypto = sources::load_crypto()?;
    let news = sources::load_news(fetcher, &config.sources).await?;
    let covid = sources::load_covid(fetcher, &config.sources).await?;
    for (label, table) in [
        ("Weather", &weather),
        ("Stocks", &stocks),
        ("Crypto", &crypto),
        ("News", &news),
        ("COVID-19", &covid),
    ] {
        info!("{}: {}", label, table);
    }

    let analyzer = AnalyzerImpl::new();
    report_stats(&analyzer, &stocks, "Stock Data");
    report_stats(&analyzer, &covid, "COVID-19 Data");

    let out = &config.output;
    let stock_change = detect_change(&out.stock_data, &stocks)?;
    info!("Stock data: {}", stock_change);
    let crypto_change = detect_change(&out.crypto_data, &crypto)?;
    info!("Crypto data: {}", crypto_change);

    save_table(&out.stock_data, &stocks)?;
    save_table(&out.crypto_data, &crypto)?;
    info!(
        "Saved {} and {}",
        out.stock_data.display(),
        out.crypto_data.display()
    );

    let renderer = ChartRenderer::new(&config.charts);
    let charts = vec![
        renderer.weather(&weather, &out.weather_chart)?,
        renderer.stocks(&stocks, &out.stock_chart)?,
        renderer.crypto(&crypto, &out.crypto_chart)?,
        renderer.news(&news, &out.news_chart)?,
        renderer.covid(&covid, &out.covid_chart)?,
    ];

    info!("✅ All charts generated and saved.");
    Ok(RunReport {
        stock_change,
        crypto_change,
        charts,
    })
}

fn report_stats(analyzer: &impl Analyzer, table: &Table, label: &str) {
    for line in stats_lines(analyzer, table, label) {
        info!("{}", line);
    }
}

/// The statistics block for `table`. Empty when it has none of `STAT_COLUMNS`.
fn stats_lines(analyzer: &impl Analyzer, table: &Table, label: &str) -> Vec<String> {
    match analyzer.calculate_stats(table) {
        Some(stats) => std::iter::once(format!("--- {} ---", label))
            .chain(stats.to_string().lines().map(str::to_string))
            .collect(),
        None if STAT_COLUMNS.iter().any(|name| table.column(name).is_some()) => {
            vec![format!("--- {} --- no numeric values", label)]
        }
        None => Vec::new(),
    }
}
