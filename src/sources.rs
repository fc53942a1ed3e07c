// The five dataset loaders
use crate::config::SourceConfig;
use crate::model::{AppError, Column, PageRequest, Table};
use crate::parser::{CovidPageParser, NewsPageParser, PageParser, StockPageParser};
use crate::scraper::Fetcher;
use tracing::warn;

pub fn load_weather() -> Result<Table, AppError> {
    Ok(Table::new(vec![
        (
            "Weather".into(),
            Column::Text(vec!["Sunny".into(), "Rainy".into(), "Cloudy".into(), "Snowy".into()]),
        ),
        ("Frequency".into(), Column::Integer(vec![12, 5, 7, 3])),
    ])?)
}

/// Substituted when the listings page yields no usable rows.
pub fn fallback_stocks() -> Result<Table, AppError> {
    let symbols = ["AAPL", "MSFT", "GOOG", "AMZN", "TSLA"];
    let names = ["Apple", "Microsoft", "Google", "Amazon", "Tesla"];
    Ok(Table::new(vec![
        ("Symbol".into(), Column::Text(symbols.iter().map(|s| s.to_string()).collect())),
        ("Name".into(), Column::Text(names.iter().map(|s| s.to_string()).collect())),
        ("Price".into(), Column::Float(vec![175.23, 300.56, 125.45, 115.78, 199.34])),
    ])?)
}

pub async fn load_stocks(fetcher: &dyn Fetcher, cfg: &SourceConfig) -> Result<Table, AppError> {
    let html = fetcher
        .fetch(&PageRequest {
            url: cfg.stocks_url.clone(),
            browser_agent: true,
        })
        .await?;
    let table = StockPageParser.parse(&html)?;

    if table.is_empty() {
        warn!("No valid stock data. Using fallback data.");
        return fallback_stocks();
    }
    Ok(table)
}

pub fn load_crypto() -> Result<Table, AppError> {
    warn!("Unable to retrieve live crypto data, loading dummy data...");
    Ok(Table::new(vec![
        (
            "Name".into(),
            Column::Text(vec!["Bitcoin".into(), "Ethereum".into(), "Solana".into()]),
        ),
        ("Price".into(), Column::Integer(vec![65000, 3200, 170])),
    ])?)
}

pub async fn load_news(fetcher: &dyn Fetcher, cfg: &SourceConfig) -> Result<Table, AppError> {
    let html = fetcher
        .fetch(&PageRequest {
            url: cfg.news_url.clone(),
            browser_agent: false,
        })
        .await?;
    Ok(NewsPageParser.parse(&html)?)
}

pub async fn load_covid(fetcher: &dyn Fetcher, cfg: &SourceConfig) -> Result<Table, AppError> {
    let html = fetcher
        .fetch(&PageRequest {
            url: cfg.covid_url.clone(),
            browser_agent: true,
        })
        .await?;
    Ok(CovidPageParser.parse(&html)?)
}
