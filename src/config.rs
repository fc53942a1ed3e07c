use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub stocks_url: String,
    pub news_url: String,
    pub covid_url: String,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            stocks_url: "https://finance.yahoo.com/most-active".into(),
            news_url: "https://news.ycombinator.com/".into(),
            covid_url: "https://www.worldometers.info/coronavirus/".into(),
            user_agent: "Mozilla/5.0".into(),
        }
    }
}

/// Where datasets and charts are written. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub stock_data: PathBuf,
    pub crypto_data: PathBuf,
    pub weather_chart: PathBuf,
    pub stock_chart: PathBuf,
    pub crypto_chart: PathBuf,
    pub news_chart: PathBuf,
    pub covid_chart: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            stock_data: "stock_data.csv".into(),
            crypto_data: "crypto_data.csv".into(),
            weather_chart: "weather_chart.png".into(),
            stock_chart: "stock_prices.png".into(),
            crypto_chart: "crypto_chart.png".into(),
            news_chart: "news_chart.png".into(),
            covid_chart: "covid_chart.png".into(),
        }
    }
}

#[cfg(test)]
impl OutputConfig {
    /// Same file names, placed under `dir`.
    pub fn under(dir: &Path) -> Self {
        let d = Self::default();
        Self {
            stock_data: dir.join(d.stock_data),
            crypto_data: dir.join(d.crypto_data),
            weather_chart: dir.join(d.weather_chart),
            stock_chart: dir.join(d.stock_chart),
            crypto_chart: dir.join(d.crypto_chart),
            news_chart: dir.join(d.news_chart),
            covid_chart: dir.join(d.covid_chart),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    /// TrueType fonts tried in order for chart text.
    pub font_paths: Vec<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            font_paths: vec![
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".into(),
                "/usr/share/fonts/dejavu/DejaVuSans.ttf".into(),
                "/usr/share/fonts/TTF/DejaVuSans.ttf".into(),
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf".into(),
                "/System/Library/Fonts/Supplemental/Arial.ttf".into(),
                "C:\\Windows\\Fonts\\arial.ttf".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sources: SourceConfig,
    pub output: OutputConfig,
    pub charts: ChartConfig,
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Reads `path` if it exists, otherwise falls back to the built-in defaults.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_or_default(&dir.path().join("config.json")).unwrap();
        assert_eq!(cfg.output.stock_data, PathBuf::from("stock_data.csv"));
        assert_eq!(cfg.sources.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "output": { "crypto_data": "out/crypto.csv" }, "charts": { "width": 640 } }"#)
            .unwrap();

        let cfg = load_config_or_default(&path).unwrap();
        assert_eq!(cfg.output.crypto_data, PathBuf::from("out/crypto.csv"));
        assert_eq!(cfg.output.stock_data, PathBuf::from("stock_data.csv"));
        assert_eq!(cfg.charts.width, 640);
        assert_eq!(cfg.charts.height, 600);
        assert_eq!(cfg.sources.news_url, "https://news.ycombinator.com/");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_config_or_default(&path), Err(ConfigError::Json(_))));
    }
}
