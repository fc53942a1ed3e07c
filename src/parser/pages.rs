// Site-specific parsers: stock listings, COVID-19 statistics and news front page
use crate::model::{Column, ParserError, Table};
use crate::normalizer::{parse_count, parse_price};
use crate::parser::rows::{cell_text, select_rows, select_texts, stripped_text};
use std::ops::Range;
use tracing::warn;

/// Rows 2 through 6 of a table: the header row is skipped, the next five kept.
pub const TOP_ROWS: Range<usize> = 1..6;

const STOCK_TABLE: &str = "table";
const COVID_TABLE: &str = "table#main_table_countries_today";
const NEWS_TITLES: &str = ".titleline > a";

pub trait PageParser {
    fn parse(&self, html: &str) -> Result<Table, ParserError>;
}

pub struct StockPageParser;

impl PageParser for StockPageParser {
    fn parse(&self, html: &str) -> Result<Table, ParserError> {
        let rows = select_rows(html, STOCK_TABLE, TOP_ROWS, cell_text)?;
        stock_table(&rows)
    }
}

/// Builds `Symbol`/`Name`/`Price` from row cells. Rows with an unparsable price are skipped.
pub fn stock_table(rows: &[Vec<String>]) -> Result<Table, ParserError> {
    let mut symbols = Vec::new();
    let mut names = Vec::new();
    let mut prices = Vec::new();

    for cells in rows {
        let [symbol, name, price_text, ..] = cells.as_slice() else {
            continue;
        };
        let Some(price) = parse_price(price_text) else {
            warn!("Skipping {} due to bad price: {}", symbol, price_text);
            continue;
        };
        symbols.push(symbol.clone());
        names.push(name.clone());
        prices.push(price);
    }

    Ok(Table::new(vec![
        ("Symbol".into(), Column::Text(symbols)),
        ("Name".into(), Column::Text(names)),
        ("Price".into(), Column::Float(prices)),
    ])?)
}

pub struct CovidPageParser;

impl PageParser for CovidPageParser {
    fn parse(&self, html: &str) -> Result<Table, ParserError> {
        let rows = select_rows(html, COVID_TABLE, TOP_ROWS, stripped_text)?;
        covid_table(&rows)
    }
}

/// Builds `Country`/`Cases` from row cells. A row whose case count does not
/// parse as an integer is dropped entirely.
pub fn covid_table(rows: &[Vec<String>]) -> Result<Table, ParserError> {
    let mut countries = Vec::new();
    let mut cases = Vec::new();

    for cells in rows {
        let [_, country, case_text, ..] = cells.as_slice() else {
            continue;
        };
        match parse_count(case_text) {
            Some(count) => {
                countries.push(country.clone());
                cases.push(count);
            }
            None => warn!("Skipping {} due to bad case count: {}", country, case_text),
        }
    }

    Ok(Table::new(vec![
        ("Country".into(), Column::Text(countries)),
        ("Cases".into(), Column::Integer(cases)),
    ])?)
}

pub struct NewsPageParser;

impl PageParser for NewsPageParser {
    /// One `News Title` column, or a table with no columns when nothing matched.
    fn parse(&self, html: &str) -> Result<Table, ParserError> {
        let titles = select_texts(html, NEWS_TITLES)?;
        if titles.is_empty() {
            return Ok(Table::empty());
        }
        Ok(Table::new(vec![("News Title".into(), Column::Text(titles))])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    const STOCKS_HTML: &str = r#"
        <table>
          <thead><tr><th>Symbol</th><th>Name</th><th>Price</th></tr></thead>
          <tbody>
            <tr><td>NVDA</td><td>NVIDIA Corporation</td><td>1,120.50</td></tr>
            <tr><td>F</td><td>Ford Motor Company</td><td>12.10</td></tr>
            <tr><td>BAD</td><td>Broken Inc</td><td>--</td></tr>
            <tr><td>AAL</td><td>American Airlines</td><td>14.02</td></tr>
            <tr><td>SHORT</td></tr>
            <tr><td>LATE</td><td>Seventh Row</td><td>1.00</td></tr>
          </tbody>
        </table>"#;

    #[test]
    fn stock_page_skips_bad_rows() {
        let table = StockPageParser.parse(STOCKS_HTML).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.text("Symbol").unwrap(), ["NVDA", "F", "AAL"]);
        assert_eq!(table.numeric("Price").unwrap(), vec![1120.5, 12.1, 14.02]);
    }

    #[test]
    fn stock_page_without_table_fails() {
        let err = StockPageParser.parse("<html><body>blocked</body></html>").unwrap_err();
        assert!(matches!(err, ParserError::StructureMismatch(_)));
    }

    #[test]
    fn stock_rows_all_invalid_give_empty_table() {
        let rows = vec![cells(&["X", "Xylo", "n/a"]), cells(&["Y", "Yolo", ""])];
        let table = stock_table(&rows).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_names(), vec!["Symbol", "Name", "Price"]);
    }

    #[test]
    fn covid_rows_drop_country_with_count() {
        let rows = vec![
            cells(&["", "World", "704,753,890"]),
            cells(&["1", "USA", "+111,820,082"]),
            cells(&["2", "Nowhere", "N/A"]),
            cells(&["3", "Short"]),
        ];
        let table = covid_table(&rows).unwrap();
        assert_eq!(table.text("Country").unwrap(), ["World", "USA"]);
        assert_eq!(table.column("Cases"), Some(&Column::Integer(vec![704_753_890, 111_820_082])));
    }

    #[test]
    fn covid_page_uses_table_id() {
        let html = r#"
            <table><tr><td>decoy</td><td>x</td><td>1</td></tr></table>
            <table id="main_table_countries_today">
              <tr><th>#</th><th>Country</th><th>Total</th></tr>
              <tr><td></td><td>World</td><td>100</td></tr>
              <tr><td>1</td><td>USA</td><td>+50</td></tr>
            </table>"#;
        let table = CovidPageParser.parse(html).unwrap();
        assert_eq!(table.text("Country").unwrap(), ["World", "USA"]);
        assert_eq!(table.numeric("Cases").unwrap(), vec![100.0, 50.0]);
    }

    #[test]
    fn covid_cells_split_across_elements_parse() {
        let html = r#"
            <table id="main_table_countries_today">
              <tr><th>#</th><th>Country</th><th>Total</th></tr>
              <tr><td>1</td><td> <a href="usa">USA</a> </td><td> 1, <b>234</b></td></tr>
            </table>"#;
        let table = CovidPageParser.parse(html).unwrap();
        assert_eq!(table.text("Country").unwrap(), ["USA"]);
        assert_eq!(table.column("Cases"), Some(&Column::Integer(vec![1234])));
    }

    #[test]
    fn news_titles_are_extracted() {
        let html = r#"
            <span class="titleline"><a href="a">Show HN: A thing</a><span>(x.com)</span></span>
            <span class="titleline"><a href="b">Rust 2.0</a></span>
            <a href="c">not a title</a>"#;
        let table = NewsPageParser.parse(html).unwrap();
        assert_eq!(table.text("News Title").unwrap(), ["Show HN: A thing", "Rust 2.0"]);
    }

    #[test]
    fn news_without_titles_has_no_columns() {
        let table = NewsPageParser.parse("<html></html>").unwrap();
        assert!(table.is_empty());
        assert!(table.column_names().is_empty());
    }
}
