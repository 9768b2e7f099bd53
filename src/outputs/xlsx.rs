//! Spreadsheet report writer.
//!
//! Serializes the full ordered row table to one worksheet: a blank-headed
//! 1-based index column followed by the seven fixed data columns. The file
//! is overwritten on every run. A destination locked by another program is
//! reported as [`ScrapeError::Report`] so the caller can tell the user to
//! close it, rather than crashing.

use crate::errors::ScrapeError;
use crate::models::ResultRow;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::{info, instrument};

/// Name of the report file inside the output directory.
pub const REPORT_FILENAME: &str = "news_scrape.xlsx";

/// The fixed data column headers, in column order.
pub const REPORT_COLUMNS: [&str; 7] = [
    "Title",
    "Description",
    "Time",
    "Image",
    "Count of Search Phrases in Title",
    "Count of Search Phrases in Description",
    "Contains Money",
];

/// Write all rows to `path`, overwriting any existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = rows.len()))]
pub fn write_report(rows: &[ResultRow], path: &Path) -> Result<(), ScrapeError> {
    let report_err = |source: XlsxError| ScrapeError::Report {
        path: path.display().to_string(),
        source,
    };

    let mut workbook = Workbook::new();
    fill_sheet(workbook.add_worksheet(), rows).map_err(report_err)?;
    workbook.save(path).map_err(report_err)?;

    info!("Wrote spreadsheet report");
    Ok(())
}

fn fill_sheet(sheet: &mut Worksheet, rows: &[ResultRow]) -> Result<(), XlsxError> {
    // Column 0 is the index column; its header cell stays blank.
    for (col, header) in REPORT_COLUMNS.iter().enumerate() {
        sheet.write_string(0, (col + 1) as u16, *header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_number(r, 0, (i + 1) as f64)?;
        sheet.write_string(r, 1, &row.title)?;
        sheet.write_string(r, 2, &row.description)?;
        sheet.write_string(r, 3, &row.published_label)?;
        sheet.write_string(r, 4, &row.image_path)?;
        sheet.write_number(r, 5, row.title_phrase_count)?;
        sheet.write_number(r, 6, row.description_phrase_count)?;
        sheet.write_boolean(r, 7, row.contains_money)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx, open_workbook};
    use std::path::PathBuf;

    fn sample_rows(n: usize) -> Vec<ResultRow> {
        (0..n)
            .map(|i| ResultRow {
                title: format!("Title {i}"),
                description: format!("Description {i} with $4 million attached"),
                published_label: "Aug. 5, 2026".to_string(),
                image_path: format!("output/images/slug{i}.jpg"),
                title_phrase_count: i as u32,
                description_phrase_count: (i * 2) as u32,
                contains_money: true,
            })
            .collect()
    }

    fn temp_report(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("clipper_report_{}_{}.xlsx", std::process::id(), name))
    }

    fn string_at(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
        match range.get_value((row, col)) {
            Some(Data::String(s)) => s.clone(),
            other => panic!("expected a string at ({row}, {col}), got {other:?}"),
        }
    }

    #[test]
    fn test_round_trip_preserves_rows_and_index() {
        let rows = sample_rows(5);
        let path = temp_report("round_trip");
        write_report(&rows, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();

        // Header: blank index cell, then the fixed seven columns.
        assert!(matches!(range.get_value((0, 0)), None | Some(Data::Empty)));
        for (col, header) in REPORT_COLUMNS.iter().enumerate() {
            assert_eq!(&string_at(&range, 0, (col + 1) as u32), header);
        }

        // One header row plus N data rows, index running 1..=N.
        assert_eq!(range.height(), 6);
        for i in 0..5u32 {
            let r = i + 1;
            assert_eq!(range.get_value((r, 0)), Some(&Data::Float((i + 1) as f64)));
            assert_eq!(string_at(&range, r, 1), format!("Title {i}"));
            assert_eq!(
                string_at(&range, r, 2),
                format!("Description {i} with $4 million attached")
            );
            assert_eq!(string_at(&range, r, 3), "Aug. 5, 2026");
            assert_eq!(string_at(&range, r, 4), format!("output/images/slug{i}.jpg"));
            assert_eq!(range.get_value((r, 5)), Some(&Data::Float(i as f64)));
            assert_eq!(range.get_value((r, 6)), Some(&Data::Float((i * 2) as f64)));
            assert_eq!(range.get_value((r, 7)), Some(&Data::Bool(true)));
        }

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_overwrites_previous_report() {
        let path = temp_report("overwrite");
        write_report(&sample_rows(4), &path).unwrap();
        write_report(&sample_rows(1), &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        assert_eq!(range.height(), 2);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_table_still_writes_header() {
        let path = temp_report("empty");
        write_report(&[], &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        assert_eq!(&string_at(&range, 0, 1), "Title");
        assert_eq!(range.height(), 1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unwritable_destination_is_reported() {
        let path = PathBuf::from("/definitely/not/a/dir/report.xlsx");
        let err = write_report(&sample_rows(1), &path).unwrap_err();
        assert!(matches!(err, ScrapeError::Report { .. }));
    }
}
