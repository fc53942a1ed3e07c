// Parsing of fetched markup into tables. Knowledge of page layouts lives here.

pub mod pages;
pub mod rows;

pub use pages::{CovidPageParser, NewsPageParser, PageParser, StockPageParser};
