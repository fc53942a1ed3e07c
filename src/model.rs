// Core types: Table, Column and the error enums shared across modules
use std::fmt;
use thiserror::Error;

/// A homogeneous column of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Float(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Text(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::Float(v) => v.len(),
        }
    }

    /// Numeric values widened to `f64`; `None` for text columns.
    pub fn as_f64(&self) -> Option<Vec<f64>> {
        match self {
            Column::Text(_) => None,
            Column::Integer(v) => Some(v.iter().map(|&x| x as f64).collect()),
            Column::Float(v) => Some(v.clone()),
        }
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            Column::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Formats one cell the way it is written to disk.
    ///
    /// Floats always keep a decimal point (or exponent) so that a float column
    /// is read back as a float column.
    pub fn cell(&self, row: usize) -> Option<String> {
        match self {
            Column::Text(v) => v.get(row).cloned(),
            Column::Integer(v) => v.get(row).map(|x| x.to_string()),
            Column::Float(v) => v.get(row).map(|x| format!("{:?}", x)),
        }
    }
}

/// An ordered set of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<(String, Column)>,
}

impl Table {
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self, TableError> {
        if let Some((_, first)) = columns.first() {
            let expected = first.len();
            for (name, column) in &columns {
                if column.len() != expected {
                    return Err(TableError::LengthMismatch {
                        column: name.clone(),
                        expected,
                        found: column.len(),
                    });
                }
            }
        }
        for (i, (name, _)) in columns.iter().enumerate() {
            if columns[..i].iter().any(|(other, _)| other == name) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// A table without any columns. Signals "no data".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.row_count() == 0
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|(_, c)| c.len()).unwrap_or(0)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn columns(&self) -> &[(String, Column)] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, column)| column)
    }

    pub fn numeric(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name).and_then(Column::as_f64)
    }

    pub fn text(&self, name: &str) -> Option<&[String]> {
        self.column(name).and_then(Column::as_text)
    }
}

/// A page to fetch. `browser_agent` asks the fetcher to present itself as a browser.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub url: String,
    pub browser_agent: bool,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response status {0}")]
    InvalidResponse(u16),
    #[error("no page for {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector '{0}'")]
    Selector(String),
    #[error("page structure mismatch: {0}")]
    StructureMismatch(String),
    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing failed: {0}")]
    Draw(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scraper(#[from] ScraperError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows x [{}]", self.row_count(), self.column_names().join(", "))
    }
}
