use std::collections::{HashMap, HashSet};
use std::path::Path;

use survey_coding::RawValue;

/// The supported input formats.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputProvider {
    Excel,
    Csv,
}

impl InputProvider {
    pub fn parse(s: &str) -> Option<InputProvider> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(InputProvider::Excel),
            "csv" | "tsv" => Some(InputProvider::Csv),
            _ => None,
        }
    }

    /// Guesses the format from the file extension. Excel is the default.
    pub fn from_path(path: &str) -> InputProvider {
        match extension(path).as_deref() {
            Some("csv") | Some("tsv") | Some("txt") => InputProvider::Csv,
            _ => InputProvider::Excel,
        }
    }
}

fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Tab for .tsv files, comma otherwise.
pub fn default_delimiter(path: &str) -> u8 {
    match extension(path).as_deref() {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Turns the raw header cells into unique column names.
///
/// Blank cells are named after their position (`Unnamed: 3`), and repeated
/// names get a numeric suffix (`Age`, `Age.1`, `Age.2`).
pub fn normalize_header(cells: &[Option<String>]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut res: Vec<String> = Vec::new();
    for (idx, cell) in cells.iter().enumerate() {
        let base = match cell {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => format!("Unnamed: {}", idx),
        };
        let mut name = base.clone();
        while used.contains(&name) {
            let count = counts.entry(base.clone()).or_insert(0);
            *count += 1;
            name = format!("{}.{}", base, count);
        }
        used.insert(name.clone());
        res.push(name);
    }
    res
}

/// Reads a cell of a text file: empty is missing, numbers are numbers.
pub fn parse_text_cell(s: &str) -> RawValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return RawValue::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(x) if !x.is_infinite() => RawValue::number(x),
        _ => RawValue::Text(s.to_string()),
    }
}
