//! The pivoted price table and its CSV form.
//!
//! On disk the table is `date,<SYM>,<SYM>,...` with one row per trading day.
//! Missing cells are empty fields. When reading, the date may also sit in an
//! unnamed leading index column (`,CBA.AX,...`), which is how dataframe
//! libraries write an index without a name.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::{File, create_dir_all};
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::PricePoint;
use crate::error::AppError;

pub const DATE_COLUMN: &str = "date";

/// Date-indexed, symbol-columned closing prices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    symbols: Vec<String>,
    /// Row-major: `rows[date_idx][symbol_idx]`.
    rows: Vec<Vec<Option<f64>>>,
}

impl PriceTable {
    /// Pivot long-form points into a table.
    ///
    /// Dates are the union of all point dates, ascending; columns are sorted by
    /// symbol. A repeated `(symbol, date)` keeps the last value seen.
    pub fn from_points(points: &[PricePoint]) -> Self {
        let mut cells: BTreeMap<NaiveDate, HashMap<&str, f64>> = BTreeMap::new();
        let mut symbols: BTreeSet<&str> = BTreeSet::new();

        for p in points {
            symbols.insert(p.symbol.as_str());
            let previous = cells.entry(p.date).or_default().insert(p.symbol.as_str(), p.close);
            if previous.is_some() {
                log::debug!("{} {}: duplicate close, keeping the later value", p.symbol, p.date);
            }
        }

        let symbols: Vec<String> = symbols.into_iter().map(str::to_string).collect();
        let mut dates = Vec::with_capacity(cells.len());
        let mut rows = Vec::with_capacity(cells.len());
        for (date, by_symbol) in cells {
            dates.push(date);
            rows.push(symbols.iter().map(|s| by_symbol.get(s.as_str()).copied()).collect());
        }

        Self { dates, symbols, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.symbols.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.symbol_index(symbol).is_some()
    }

    /// One column, aligned with [`PriceTable::dates`].
    pub fn column(&self, symbol: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.symbol_index(symbol)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Back to long form, skipping empty cells. Ordered by date, then column.
    pub fn to_points(&self) -> Vec<PricePoint> {
        let mut out = Vec::new();
        for (date, row) in self.dates.iter().zip(&self.rows) {
            for (symbol, cell) in self.symbols.iter().zip(row) {
                if let Some(close) = cell {
                    out.push(PricePoint::new(symbol.clone(), *date, *close));
                }
            }
        }
        out
    }

    fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }
}

/// Write the table as CSV, replacing any existing file.
///
/// The parent directory is created if missing.
pub fn write_table_csv(path: &Path, table: &PriceTable) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| {
            AppError::io(format!("Failed to create data directory '{}': {e}", parent.display()))
        })?;
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create table CSV '{}': {e}", path.display())))?;

    let mut header = Vec::with_capacity(table.symbols.len() + 1);
    header.push(DATE_COLUMN.to_string());
    header.extend(table.symbols.iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| AppError::io(format!("Failed to write table CSV header: {e}")))?;

    for (date, row) in table.dates.iter().zip(&table.rows) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(date.format("%Y-%m-%d").to_string());
        record.extend(row.iter().map(|cell| cell.map(|v| v.to_string()).unwrap_or_default()));
        writer
            .write_record(&record)
            .map_err(|e| AppError::io(format!("Failed to write table CSV row for {date}: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush table CSV '{}': {e}", path.display())))?;
    Ok(())
}

/// Load a table CSV written by [`write_table_csv`] or by a dataframe library.
///
/// Rows are re-sorted by date; a repeated date keeps the later row's
/// non-empty cells.
pub fn read_table_csv(path: &Path) -> Result<PriceTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open table CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::io(format!("Failed to read table CSV headers: {e}")))?
        .clone();

    let date_idx = locate_date_column(&headers)?;
    let symbol_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != date_idx)
        .map(|(idx, name)| (idx, normalize_header_name(name).to_string()))
        .collect();

    let mut points = Vec::new();
    let mut dates = BTreeSet::new();
    for (n, result) in reader.records().enumerate() {
        // +2: header is line 1 and records are 1-based.
        let line = n + 2;
        let record =
            result.map_err(|e| AppError::io(format!("Table CSV parse error on line {line}: {e}")))?;

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_table_date(raw_date).ok_or_else(|| {
            AppError::io(format!("Invalid date '{raw_date}' on line {line} of '{}'", path.display()))
        })?;
        dates.insert(date);

        for (idx, symbol) in &symbol_cols {
            let raw = record.get(*idx).unwrap_or_default();
            if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
                continue;
            }
            let close = raw.parse::<f64>().map_err(|e| {
                AppError::io(format!("Invalid close '{raw}' for {symbol} on line {line}: {e}"))
            })?;
            points.push(PricePoint::new(symbol.clone(), date, close));
        }
    }

    // Rows and columns without any value still belong to the table.
    let table = PriceTable::from_points(&points);
    Ok(reindex(table, dates, symbol_cols.into_iter().map(|(_, s)| s)))
}

/// Prefer an explicit `date` column; otherwise the first column is the index.
fn locate_date_column(headers: &StringRecord) -> Result<usize, AppError> {
    if headers.is_empty() {
        return Err(AppError::io("Table CSV has no header row."));
    }
    Ok(headers
        .iter()
        .position(|h| normalize_header_name(h).eq_ignore_ascii_case(DATE_COLUMN))
        .unwrap_or(0))
}

fn normalize_header_name(name: &str) -> &str {
    name.trim().trim_start_matches('\u{feff}')
}

fn parse_table_date(raw: &str) -> Option<NaiveDate> {
    raw.trim()
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Spread `table` over the given dates and columns, leaving new cells empty.
fn reindex(table: PriceTable, dates: BTreeSet<NaiveDate>, names: impl Iterator<Item = String>) -> PriceTable {
    let mut symbols: Vec<String> = names.collect();
    symbols.sort();
    symbols.dedup();
    let dates: Vec<NaiveDate> = dates.into_iter().collect();
    let rows = dates
        .iter()
        .map(|date| {
            let row = table.dates.binary_search(date).ok();
            symbols
                .iter()
                .map(|s| {
                    let (r, c) = (row?, table.symbol_index(s)?);
                    table.rows[r][c]
                })
                .collect()
        })
        .collect();
    PriceTable { dates, symbols, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::rolling_mean;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scratch_file() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        (dir, path)
    }

    fn sample_points() -> Vec<PricePoint> {
        vec![
            PricePoint::new("NAB.AX", date(2024, 1, 3), 33.1),
            PricePoint::new("CBA.AX", date(2024, 1, 2), 113.0),
            PricePoint::new("CBA.AX", date(2024, 1, 3), 114.25),
            PricePoint::new("NAB.AX", date(2024, 1, 4), 33.4),
        ]
    }

    #[test]
    fn pivot_unions_dates_and_sorts_columns() {
        let table = PriceTable::from_points(&sample_points());
        assert_eq!(table.dates(), &[date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]);
        assert_eq!(table.symbols(), &["CBA.AX".to_string(), "NAB.AX".to_string()]);
        assert_eq!(table.column("CBA.AX").unwrap(), vec![Some(113.0), Some(114.25), None]);
        assert_eq!(table.column("NAB.AX").unwrap(), vec![None, Some(33.1), Some(33.4)]);
        assert!(table.column("BHP.AX").is_none());
    }

    #[test]
    fn symbol_column_holds_exactly_its_response_dates() {
        let table = PriceTable::from_points(&sample_points());
        let cba = table.column("CBA.AX").unwrap();
        let present: Vec<NaiveDate> = table
            .dates()
            .iter()
            .zip(&cba)
            .filter_map(|(d, c)| c.map(|_| *d))
            .collect();
        assert_eq!(present, vec![date(2024, 1, 2), date(2024, 1, 3)]);
    }

    #[test]
    fn duplicate_pairs_keep_the_last_value() {
        let points = vec![
            PricePoint::new("CBA.AX", date(2024, 1, 2), 1.0),
            PricePoint::new("CBA.AX", date(2024, 1, 2), 2.0),
        ];
        let table = PriceTable::from_points(&points);
        assert_eq!(table.column("CBA.AX").unwrap(), vec![Some(2.0)]);
    }

    #[test]
    fn csv_round_trip_preserves_triples() {
        let (_dir, path) = scratch_file();
        let table = PriceTable::from_points(&sample_points());
        write_table_csv(&path, &table).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("date,CBA.AX,NAB.AX\n"));
        assert!(text.contains("2024-01-02,113,\n"));

        let reloaded = read_table_csv(&path).unwrap();
        assert_eq!(reloaded, table);
        assert_eq!(reloaded.to_points(), table.to_points());
    }

    #[test]
    fn reads_unnamed_index_column() {
        let (_dir, path) = scratch_file();
        std::fs::write(
            &path,
            ",CBA.AX,NAB.AX\n2024-01-03 00:00:00,114.25,33.1\n2024-01-02 00:00:00,113.0,\n",
        )
        .unwrap();
        let table = read_table_csv(&path).unwrap();
        assert_eq!(table.dates(), &[date(2024, 1, 2), date(2024, 1, 3)]);
        assert_eq!(table.column("NAB.AX").unwrap(), vec![None, Some(33.1)]);
    }

    #[test]
    fn reads_date_column_in_any_position() {
        let (_dir, path) = scratch_file();
        std::fs::write(&path, "\u{feff}CBA.AX,date\n113.0,2024-01-02\n").unwrap();
        let table = read_table_csv(&path).unwrap();
        assert_eq!(table.to_points(), vec![PricePoint::new("CBA.AX", date(2024, 1, 2), 113.0)]);
    }

    #[test]
    fn all_empty_column_survives_reload() {
        let (_dir, path) = scratch_file();
        std::fs::write(&path, "date,AGL.AX,CBA.AX\n2024-01-02,,113.0\n").unwrap();
        let table = read_table_csv(&path).unwrap();
        assert!(table.has_symbol("AGL.AX"));
        assert_eq!(table.column("AGL.AX").unwrap(), vec![None]);
    }

    #[test]
    fn all_empty_row_survives_reload() {
        let (_dir, path) = scratch_file();
        std::fs::write(
            &path,
            "date,CBA.AX,NAB.AX\n2024-01-02,1.0,2.0\n2024-01-03,,\n2024-01-04,3.0,4.0\n",
        )
        .unwrap();
        let table = read_table_csv(&path).unwrap();
        assert_eq!(table.dates(), &[date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]);

        let cba = table.column("CBA.AX").unwrap();
        assert_eq!(cba, vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(rolling_mean(&cba, 2), vec![Some(1.0), Some(1.0), Some(3.0)]);
    }

    #[test]
    fn missing_file_and_bad_cells_are_errors() {
        let (_dir, path) = scratch_file();
        assert_eq!(read_table_csv(&path).unwrap_err().exit_code(), 2);

        std::fs::write(&path, "date,CBA.AX\nyesterday,1.0\n").unwrap();
        assert!(read_table_csv(&path).is_err());

        std::fs::write(&path, "date,CBA.AX\n2024-01-02,abc\n").unwrap();
        assert!(read_table_csv(&path).is_err());
    }
}
