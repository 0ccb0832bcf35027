// Primitives for reading CSV files.

use crate::codesheet::{
    io_common::{normalize_header, parse_text_cell},
    *,
};

pub fn read_csv_dataset(path: &str, delimiter: u8) -> CsResult<Dataset> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();

    // An empty file has no column and no respondent.
    let header: Vec<Option<String>> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineParseSnafu { lineno: 1_usize })?
            .iter()
            .map(|s| Some(s.to_string()))
            .collect(),
        None => vec![],
    };
    let columns = normalize_header(&header);
    debug!("read_csv_dataset: header: {:?}", columns);

    let mut rows: Vec<Vec<RawValue>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        if line.iter().all(|s| s.trim().is_empty()) {
            debug!("read_csv_dataset: skipping blank line {}", lineno);
            continue;
        }
        let row: Vec<RawValue> = line.iter().map(parse_text_cell).collect();
        debug!("read_csv_dataset: lineno: {:?} row: {:?}", lineno, &row);
        rows.push(row);
    }
    info!(
        "read_csv_dataset: {} rows, {} columns in {:?}",
        rows.len(),
        columns.len(),
        path
    );
    Ok(Dataset::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_header_and_values() {
        let f = csv_file("Q1;Q2;\nSí;3;x\nNo;;\n\n;4\n");
        let ds = read_csv_dataset(f.path().to_str().unwrap(), b';').unwrap();
        assert_eq!(ds.columns, vec!["Q1", "Q2", "Unnamed: 2"]);
        assert_eq!(ds.sample_size(), 3);
        assert_eq!(ds.value(0, 0), &RawValue::Text("Sí".to_string()));
        assert_eq!(ds.value(0, 1), &RawValue::Number(3.0));
        assert_eq!(ds.value(1, 1), &RawValue::Missing);
        assert_eq!(ds.value(2, 0), &RawValue::Missing);
        assert_eq!(ds.value(2, 1), &RawValue::Number(4.0));
        assert_eq!(ds.value(2, 2), &RawValue::Missing);
    }

    #[test]
    fn empty_file_is_an_empty_dataset() {
        let f = csv_file("");
        let ds = read_csv_dataset(f.path().to_str().unwrap(), b',').unwrap();
        assert!(ds.columns.is_empty());
        assert_eq!(ds.sample_size(), 0);
    }

    #[test]
    fn missing_file_fails() {
        let res = read_csv_dataset("/nonexistent/answers.csv", b',');
        assert!(matches!(res, Err(CodeSheetError::CsvOpen { .. })));
    }
}
