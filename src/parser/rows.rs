use crate::model::ParserError;
use scraper::{ElementRef, Html, Selector};
use std::ops::Range;

pub fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::Selector(format!("{css}: {e}")))
}

/// Text content of an element, trimmed.
pub fn cell_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text content with every text node trimmed before joining: `<td> 1, <b>234</b></td>` is "1,234".
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Returns the `td` texts, extracted with `text`, of the rows in `rows` (0-based,
/// header included) of the first element matching `table_selector`.
///
/// Fails with `StructureMismatch` when no such table exists.
pub fn select_rows(
    html: &str,
    table_selector: &str,
    rows: Range<usize>,
    text: fn(ElementRef<'_>) -> String,
) -> Result<Vec<Vec<String>>, ParserError> {
    let document = Html::parse_document(html);
    let table_sel = selector(table_selector)?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let table = document.select(&table_sel).next().ok_or_else(|| {
        ParserError::StructureMismatch(format!("no element matches '{table_selector}'"))
    })?;

    Ok(table
        .select(&row_sel)
        .skip(rows.start)
        .take(rows.end.saturating_sub(rows.start))
        .map(|row| row.select(&cell_sel).map(text).collect())
        .collect())
}

/// Trimmed texts of every element matching `css`, in document order.
pub fn select_texts(html: &str, css: &str) -> Result<Vec<String>, ParserError> {
    let document = Html::parse_document(html);
    let sel = selector(css)?;
    Ok(document.select(&sel).map(cell_text).collect())
}
