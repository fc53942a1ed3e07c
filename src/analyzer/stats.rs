use crate::model::Table;
use std::fmt;

/// Columns inspected by `calculate_stats`, in order of preference.
pub const STAT_COLUMNS: [&str; 2] = ["Price", "Cases"];

/// Trait defining the interface for a dataset analyzer.
pub trait Analyzer {
    /// Statistics for the first of `STAT_COLUMNS` present in `table`.
    ///
    /// `None` when neither column exists, the column is not numeric, or it has no values.
    fn calculate_stats(&self, table: &Table) -> Option<ColumnStats>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// The most frequent value; ties resolve to the smallest.
    Value(f64),
    /// Every value occurs exactly once.
    AllUnique,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub mode: Mode,
}

pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    fn calculate_stats(&self, table: &Table) -> Option<ColumnStats> {
        let column = STAT_COLUMNS
            .into_iter()
            .find(|name| table.column(name).is_some())?;
        let values = table.numeric(column)?;
        summarize(column, &values)
    }
}

/// Mean, median, min, max and mode of `values`; `None` if empty.
pub fn summarize(column: &str, values: &[f64]) -> Option<ColumnStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    Some(ColumnStats {
        column: column.to_string(),
        count,
        // Summation error can push the mean a hair outside the observed range.
        mean: mean.clamp(sorted[0], sorted[count - 1]),
        median,
        min: sorted[0],
        max: sorted[count - 1],
        mode: mode_of_sorted(&sorted),
    })
}

fn mode_of_sorted(sorted: &[f64]) -> Mode {
    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let run = sorted[i..].iter().take_while(|&&v| v == value).count();
        // Strictly greater keeps the first (smallest) value of a tie.
        if best.is_none_or(|(_, n)| run > n) {
            best = Some((value, run));
        }
        i += run;
    }

    match best {
        Some((value, n)) if n > 1 => Mode::Value(value),
        _ => Mode::AllUnique,
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Value(v) => write!(f, "{}", v),
            Mode::AllUnique => write!(f, "No mode (all values are unique)"),
        }
    }
}

impl fmt::Display for ColumnStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.column;
        writeln!(f, "Mean {}: {}", c, self.mean)?;
        writeln!(f, "Median {}: {}", c, self.median)?;
        writeln!(f, "Min {}: {}", c, self.min)?;
        writeln!(f, "Max {}: {}", c, self.max)?;
        write!(f, "Mode {}: {}", c, self.mode)
    }
}
