// Primitives for reading Excel and OpenDocument workbooks.

use calamine::{open_workbook_auto, DataType, Range, Reader};
use chrono::NaiveDateTime;

use crate::codesheet::{io_common::normalize_header, *};

/// Date cells are read as text in this form.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn date_text(dt: &NaiveDateTime) -> RawValue {
    RawValue::Text(dt.format(DATETIME_FORMAT).to_string())
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> CsResult<Range<DataType>> {
    debug!(
        "read_excel_dataset: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it. Otherwise, the first worksheet holds the answers.
    match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path }),
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path }),
    }
}

fn header_cell(cell: &DataType) -> Option<String> {
    match cell {
        DataType::Empty => None,
        DataType::String(s) => Some(s.clone()),
        other => Some(read_cell(other).to_string()),
    }
}

pub fn read_cell(cell: &DataType) -> RawValue {
    match cell {
        DataType::Empty => RawValue::Missing,
        DataType::String(s) => RawValue::text(s),
        DataType::Float(f) => RawValue::number(*f),
        DataType::Int(i) => RawValue::Number(*i as f64),
        DataType::Bool(b) => RawValue::Text(b.to_string()),
        DataType::DateTime(f) => match cell.as_datetime() {
            Some(dt) => date_text(&dt),
            None => {
                warn!("read_cell: date serial {} out of range, kept as a number", f);
                RawValue::number(*f)
            }
        },
        DataType::Error(e) => {
            warn!("read_cell: error cell {:?} read as missing", e);
            RawValue::Missing
        }
        #[allow(unreachable_patterns)]
        other => {
            warn!("read_cell: unsupported cell {:?} read as missing", other);
            RawValue::Missing
        }
    }
}

pub fn read_excel_dataset(path: &str, worksheet_name: Option<&str>) -> CsResult<Dataset> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header = iter.next().context(MissingHeaderSnafu { path })?;
    let columns = normalize_header(&header.iter().map(header_cell).collect::<Vec<_>>());
    debug!("read_excel_dataset: header: {:?}", columns);

    let mut rows: Vec<Vec<RawValue>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let values: Vec<RawValue> = row.iter().map(read_cell).collect();
        // Trailing rows of a worksheet are often blank but formatted.
        if values.iter().all(|v| v.is_missing()) {
            debug!("read_excel_dataset: skipping blank row {}", idx + 2);
            continue;
        }
        debug!("read_excel_dataset: idx: {:?} row: {:?}", idx, &values);
        rows.push(values);
    }
    info!(
        "read_excel_dataset: {} rows, {} columns in {:?}",
        rows.len(),
        columns.len(),
        path
    );
    Ok(Dataset::new(columns, rows))
}
