// ********* Input data structures ***********

use std::cmp::Ordering;
use std::fmt::Display;

/// The content of one cell of the response table.
///
/// Readers are expected to normalize their native cell types into this form:
/// blank cells and NaN numbers become `Missing`.
#[derive(PartialEq, Debug, Clone)]
pub enum RawValue {
    /// No answer was recorded.
    Missing,
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Builds a number, mapping NaN to a missing value and `-0` to `0`.
    pub fn number(x: f64) -> RawValue {
        if x.is_nan() {
            RawValue::Missing
        } else if x == 0.0 {
            RawValue::Number(0.0)
        } else {
            RawValue::Number(x)
        }
    }

    /// The same value, with numbers passed through [`RawValue::number`].
    pub fn normalized(&self) -> RawValue {
        match self {
            RawValue::Number(x) => RawValue::number(*x),
            other => other.clone(),
        }
    }

    /// Builds a text value, mapping blank strings to a missing value.
    pub fn text(s: &str) -> RawValue {
        if s.trim().is_empty() {
            RawValue::Missing
        } else {
            RawValue::Text(s.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, RawValue::Number(_))
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Missing => Ok(()),
            // Spreadsheets store every number as a float.
            RawValue::Number(x) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{:.0}", x),
            RawValue::Number(x) => write!(f, "{}", x),
            RawValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Ordering used for the alternatives of a question.
///
/// When `numeric` is set, all the values are numbers and they are compared by value.
/// Otherwise the values are compared by their printed form. A number and a text that
/// print the same are still different alternatives: the number comes first.
pub(crate) fn compare_alternatives(a: &RawValue, b: &RawValue, numeric: bool) -> Ordering {
    match (a, b) {
        (RawValue::Number(x), RawValue::Number(y)) if numeric => x.total_cmp(y),
        _ => a
            .to_string()
            .cmp(&b.to_string())
            .then_with(|| b.is_number().cmp(&a.is_number())),
    }
}

static MISSING: RawValue = RawValue::Missing;

/// A full response table: the header and the rows, in file order.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<RawValue>>) -> Dataset {
        Dataset { columns, rows }
    }

    /// The number of respondents.
    pub fn sample_size(&self) -> usize {
        self.rows.len()
    }

    /// The value of a row for the given column position.
    /// Rows that are shorter than the header are padded with missing values.
    pub fn value(&self, row: usize, col: usize) -> &RawValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&MISSING)
    }

    /// All the values of one column, in row order.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &RawValue> + '_ {
        (0..self.rows.len()).map(move |row| self.value(row, col))
    }
}

/// A survey question, as detected from the header of the table.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Question {
    /// 1-based, in detection order.
    pub number: u32,
    /// The column name as read from the header.
    pub title: String,
    /// Position of the column in the dataset.
    pub column: usize,
}
