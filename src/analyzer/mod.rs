// Analyzer module: descriptive statistics over numeric dataset columns.

pub mod stats;

pub use stats::{Analyzer, AnalyzerImpl};
