use crate::model::{StorageError, Table};
use std::fs;
use std::path::Path;

/// Serializes `table` as CSV: header row first, one line per row.
///
/// This is the only serialization used, both for writing and for comparing
/// against a previously written file.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>, StorageError> {
    if table.columns().is_empty() {
        return Ok(Vec::new());
    }

    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(table.column_names())?;
    for row in 0..table.row_count() {
        wtr.write_record(
            table
                .columns()
                .iter()
                .map(|(_, column)| column.cell(row).unwrap_or_default()),
        )?;
    }

    wtr.into_inner().map_err(|e| StorageError::Io(e.into_error()))
}

/// Writes `table` to `path`, replacing any existing file.
pub fn save_table(path: &Path, table: &Table) -> Result<(), StorageError> {
    let bytes = to_csv_bytes(table)?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::sources::{fallback_stocks, load_crypto};

    /// Reads a file written by `save_table`, typing each column like the
    /// same-named column of `shape`.
    fn read_back(path: &Path, shape: &Table) -> Table {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, shape.column_names());
        let records: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().unwrap();

        let columns = shape
            .columns()
            .iter()
            .enumerate()
            .map(|(i, (name, kind))| {
                let cells = records.iter().map(|record| record[i].to_string());
                let column = match kind {
                    Column::Text(_) => Column::Text(cells.collect()),
                    Column::Integer(_) => Column::Integer(cells.map(|c| c.parse().unwrap()).collect()),
                    Column::Float(_) => Column::Float(cells.map(|c| c.parse().unwrap()).collect()),
                };
                (name.clone(), column)
            })
            .collect();
        Table::new(columns).unwrap()
    }

    #[test]
    fn writes_header_then_rows() {
        let bytes = to_csv_bytes(&load_crypto().unwrap()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Name,Price\nBitcoin,65000\nEthereum,3200\nSolana,170\n"
        );
    }

    #[test]
    fn stock_table_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock_data.csv");
        let table = fallback_stocks().unwrap();

        save_table(&path, &table).unwrap();
        let loaded = read_back(&path, &table);

        assert_eq!(loaded, table);
        assert_eq!(loaded.column_names(), vec!["Symbol", "Name", "Price"]);
    }

    #[test]
    fn whole_floats_stay_floats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        let table = Table::new(vec![
            ("Name".into(), Column::Text(vec!["A, Inc.".into(), "B \"quoted\"".into()])),
            ("Price".into(), Column::Float(vec![300.0, 0.1])),
        ])
        .unwrap();

        save_table(&path, &table).unwrap();
        assert_eq!(read_back(&path, &table), table);
    }

    #[test]
    fn numeric_looking_symbols_stay_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock_data.csv");
        let table = Table::new(vec![
            ("Symbol".into(), Column::Text(vec!["7203".into(), "0700".into()])),
            ("Name".into(), Column::Text(vec!["Toyota Motor".into(), "Tencent".into()])),
            ("Price".into(), Column::Float(vec![2875.5, 402.0])),
        ])
        .unwrap();

        save_table(&path, &table).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Symbol,Name,Price\n7203,Toyota Motor,2875.5\n0700,Tencent,402.0\n"
        );
        let loaded = read_back(&path, &table);
        assert_eq!(loaded.text("Symbol").unwrap(), ["7203", "0700"]);
        assert_eq!(loaded, table);
    }

    #[test]
    fn save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crypto_data.csv");
        fs::write(&path, "stale contents that are much longer than the new file\n".repeat(10)).unwrap();

        let table = load_crypto().unwrap();
        save_table(&path, &table).unwrap();
        assert_eq!(fs::read(&path).unwrap(), to_csv_bytes(&table).unwrap());
    }

    #[test]
    fn empty_table_writes_nothing() {
        assert!(to_csv_bytes(&Table::empty()).unwrap().is_empty());
    }
}
