// Plain-text views of a loaded survey, meant to be shown as-is to the user.

use crate::catalog::AlternativeCatalog;
use crate::stats::QuestionStats;

const WIDE_RULE: usize = 60;
const NARROW_RULE: usize = 40;

fn table_row(first: &str, second: &str, third: &str) -> String {
    format!("{:<30} {:<10} {:<10}\n", first, second, third)
}

/// Sample size, then every detected question with its numbered alternatives.
pub fn preview_text(sample_size: usize, catalogs: &[AlternativeCatalog]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Sample: {} respondents\n\n", sample_size));
    out.push_str("DETECTED QUESTIONS:\n");
    out.push_str(&format!("{}\n\n", "=".repeat(50)));
    for cat in catalogs.iter() {
        out.push_str(&format!(
            "Question {}: {}\n",
            cat.question.number, cat.question.title
        ));
        for (code, alt) in cat.coded() {
            out.push_str(&format!("  {}) {}\n", code, alt));
        }
        out.push('\n');
    }
    out
}

/// One frequency table per question, followed by a total row.
pub fn statistics_text(sample_size: usize, stats: &[QuestionStats]) -> String {
    let wide = format!("{}\n", "=".repeat(WIDE_RULE));
    let narrow = format!("{}\n", "-".repeat(NARROW_RULE));

    let mut out = String::new();
    out.push_str("SURVEY STATISTICS\n");
    out.push_str(&format!("Sample size: {}\n", sample_size));
    out.push_str(&wide);
    out.push('\n');
    for (idx, qs) in stats.iter().enumerate() {
        out.push_str(&format!("TABLE #{}\n{}\nN={}\n", idx + 1, qs.title, qs.total));
        out.push_str(&narrow);
        out.push_str(&table_row("Alternative", "FA", "%"));
        out.push_str(&narrow);
        for alt in qs.alternatives.iter() {
            out.push_str(&table_row(
                &alt.alternative.to_string(),
                &alt.frequency.to_string(),
                &format!("{:.1}%", alt.percentage),
            ));
        }
        out.push_str(&narrow);
        let total_pct = if qs.total > 0 { "100.0%" } else { "0.0%" };
        out.push_str(&table_row("Total", &qs.total.to_string(), total_pct));
        out.push('\n');
        out.push_str(&wide);
        out.push('\n');
    }
    out
}
