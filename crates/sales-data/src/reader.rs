//! CSV loading for the bakery sales export.
//!
//! Reads the point-of-sale log, validates its header and converts every row
//! into a cleaned [`Record`]. Any invalid row fails the whole load.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use sales_core::error::{Result, SalesError};
use sales_core::models::Record;
use tracing::{debug, warn};

use crate::cleaning::{
    clean_article, clean_ticket_number, parse_date, parse_quantity, parse_time, parse_unit_price,
};

/// Columns that must be present in the header row (case as exported).
pub const REQUIRED_COLUMNS: [&str; 5] =
    ["date", "ticket_number", "article", "Quantity", "unit_price"];

/// Optional time-of-day column.
pub const TIME_COLUMN: &str = "time";

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and clean every record from the CSV file at `path`.
///
/// Fails with [`SalesError::FileRead`] when the file cannot be opened and
/// with a parse error on the first invalid header or row.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read(path).map_err(|source| SalesError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(content.as_slice())?;
    if records.is_empty() {
        warn!("No sales records found in {}", path.display());
    }
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read and clean records from any CSV source.
///
/// The field delimiter is sniffed from the header line.
pub fn read_records<R: Read>(mut source: R) -> Result<Vec<Record>> {
    let mut content = Vec::new();
    source.read_to_end(&mut content)?;
    let delimiter = sniff_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(content.as_slice());

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result?;
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);
        let record = columns.clean_row(&row).map_err(|e| e.at_line(line))?;
        records.push(record);
    }

    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the columns the cleaner reads. The exporter's row-index
/// column (`Unnamed: 0` or a blank header) and any other column are skipped.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    ticket_number: usize,
    article: usize,
    quantity: usize,
    unit_price: usize,
    time: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require =
            |name: &str| find(name).ok_or_else(|| SalesError::MissingColumn(name.to_string()));

        let [date, ticket_number, article, quantity, unit_price] = REQUIRED_COLUMNS;
        Ok(Self {
            date: require(date)?,
            ticket_number: require(ticket_number)?,
            article: require(article)?,
            quantity: require(quantity)?,
            unit_price: require(unit_price)?,
            time: find(TIME_COLUMN),
        })
    }

    fn clean_row(&self, row: &StringRecord) -> Result<Record> {
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let date = parse_date(field(self.date))?;
        let time = self.time.and_then(|idx| parse_time(field(idx)));
        let ticket_number = clean_ticket_number(field(self.ticket_number));
        let article = clean_article(field(self.article))?;
        let quantity = parse_quantity(field(self.quantity))?;
        let unit_price = parse_unit_price(field(self.unit_price))?;

        Ok(Record::new(
            date,
            time,
            ticket_number,
            article,
            quantity,
            unit_price,
        ))
    }
}

/// Pick the delimiter that splits the header line into the most fields.
fn sniff_delimiter(content: &[u8]) -> u8 {
    let header = content
        .split(|&b| b == b'\n')
        .next()
        .unwrap_or_default();

    [b',', b';', b'\t', b'|']
        .into_iter()
        .max_by_key(|&delim| {
            let count = csv::ReaderBuilder::new()
                .delimiter(delim)
                .has_headers(false)
                .from_reader(header)
                .records()
                .next()
                .and_then(|r| r.ok())
                .map(|r| r.len())
                .unwrap_or(1);
            // Prefer the comma on ties.
            (count, delim == b',')
        })
        .unwrap_or(b',')
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sales_core::error::ErrorKind;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = ",date,time,ticket_number,article,Quantity,unit_price";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── load_records ──────────────────────────────────────────────────────────

    #[test]
    fn test_load_records_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[
                HEADER,
                "0,2021-01-02,08:38,150040.0,BAGUETTE,1.0,\"0,90 €\"",
                "1,2021-01-02,08:38,150040.0,PAIN AU CHOCOLAT,3.0,\"1,20 €\"",
            ],
        );

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].article(), "BAGUETTE");
        assert_eq!(records[0].ticket_number(), "150040.0");
        assert_eq!(records[0].date(), NaiveDate::from_ymd_opt(2021, 1, 2).unwrap());
        assert!((records[1].sales() - 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_load_records_end_to_end_sales() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[
                "Unnamed: 0,date,ticket_number,article,Quantity,unit_price",
                "0,2021-01-02,1,BAGUETTE,2,\"1,20 €\"",
                "1,2021-01-02,2,CROISSANT,1,\"1,10 €\"",
            ],
        );

        let records = load_records(&path).unwrap();
        let sales: Vec<f64> = records.iter().map(|r| r.sales()).collect();
        assert!((sales[0] - 2.40).abs() < 1e-9);
        assert!((sales[1] - 1.10).abs() < 1e-9);
        for r in &records {
            assert_eq!(r.sales(), r.quantity() * r.unit_price());
        }
    }

    #[test]
    fn test_load_records_missing_file_is_load_error() {
        let err = load_records(Path::new("/tmp/does-not-exist-bakery-sales.csv")).unwrap_err();
        assert!(matches!(err, SalesError::FileRead { .. }));
        assert_eq!(err.kind(), ErrorKind::Load);
    }

    #[test]
    fn test_load_records_header_only_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "empty.csv", &[HEADER]);
        assert!(load_records(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_records_bad_price_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[
                HEADER,
                "0,2021-01-02,08:38,1,BAGUETTE,1.0,\"0,90 €\"",
                "1,2021-01-02,08:39,2,COOKIE,1.0,abc",
            ],
        );

        let err = load_records(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        match err {
            SalesError::Row { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(*source, SalesError::InvalidPrice(_)));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_records_bad_date_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[HEADER, "0,not-a-date,08:38,1,BAGUETTE,1.0,\"0,90 €\""],
        );

        let err = load_records(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_load_records_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[",date,ticket_number,article,Quantity", "0,2021-01-02,1,PAIN,1.0"],
        );

        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, SalesError::MissingColumn(ref c) if c == "unit_price"));
    }

    // ── read_records ──────────────────────────────────────────────────────────

    #[test]
    fn test_read_records_without_time_column() {
        let csv = "date,ticket_number,article,Quantity,unit_price\n\
                   2021-07-14,99,COUPE,2.0,\"0,15 €\"\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].time().is_none());
    }

    #[test]
    fn test_read_records_semicolon_delimiter() {
        let csv = ";date;ticket_number;article;Quantity;unit_price\n\
                   0;2021-07-14;99;COUPE;2.0;0,15 €\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert!((records[0].unit_price() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_read_records_ragged_row_is_parse_error() {
        let csv = "date,ticket_number,article,Quantity,unit_price\n2021-07-14,99,COUPE\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_read_records_negative_quantity_rejected() {
        let csv = "date,ticket_number,article,Quantity,unit_price\n\
                   2021-07-14,99,COUPE,-1.0,\"0,15 €\"\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Invalid quantity"));
    }

    // ── sniff_delimiter ───────────────────────────────────────────────────────

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter(b"a,b,c\n1,2,3"), b',');
        assert_eq!(sniff_delimiter(b"a;b;c\n1;2;3"), b';');
        assert_eq!(sniff_delimiter(b"a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter(b"single"), b',');
    }
}
