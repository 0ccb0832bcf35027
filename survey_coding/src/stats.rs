use log::debug;

use crate::catalog::AlternativeCatalog;
use crate::dataset::{Dataset, RawValue};

/// Frequency of one alternative.
#[derive(PartialEq, Debug, Clone)]
pub struct AlternativeStats {
    pub alternative: RawValue,
    pub code: u32,
    /// Absolute frequency.
    pub frequency: u64,
    /// Rounded to one decimal place. 0 when the question has no answer.
    pub percentage: f64,
}

/// The frequency table of one question.
#[derive(PartialEq, Debug, Clone)]
pub struct QuestionStats {
    pub number: u32,
    pub title: String,
    pub alternatives: Vec<AlternativeStats>,
    /// Number of non-missing answers.
    pub total: u64,
}

/// Rounds the way the value is printed with one decimal: exact ties go to the even digit.
fn round_one_decimal(x: f64) -> f64 {
    format!("{:.1}", x).parse::<f64>().unwrap_or(x)
}

/// Percentage of `frequency` over `total`, rounded to one decimal.
pub fn percentage(frequency: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(frequency as f64 / total as f64 * 100.0)
}

/// Computes the frequency table of one question over all the rows.
pub fn question_stats(catalog: &AlternativeCatalog, dataset: &Dataset) -> QuestionStats {
    let column = catalog.question.column;
    let total = dataset
        .column_values(column)
        .filter(|v| !v.is_missing())
        .count() as u64;

    let alternatives: Vec<AlternativeStats> = catalog
        .coded()
        .map(|(code, alt)| {
            let frequency = dataset.column_values(column).filter(|v| *v == alt).count() as u64;
            AlternativeStats {
                alternative: alt.clone(),
                code,
                frequency,
                percentage: percentage(frequency, total),
            }
        })
        .collect();

    if total == 0 {
        debug!(
            "question_stats: question {} ({:?}) has no answer",
            catalog.question.number, catalog.question.title
        );
    }

    QuestionStats {
        number: catalog.question.number,
        title: catalog.question.title.clone(),
        alternatives,
        total,
    }
}

/// The frequency tables of all the questions, in question order.
pub fn compute_statistics(catalogs: &[AlternativeCatalog], dataset: &Dataset) -> Vec<QuestionStats> {
    catalogs
        .iter()
        .map(|cat| question_stats(cat, dataset))
        .collect()
}
