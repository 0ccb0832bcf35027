use log::debug;

use crate::dataset::Question;

/// Substrings that mark a column as administrative metadata rather than a question.
/// The column name is lower-cased before the test.
pub const ADMIN_KEYWORDS: [&str; 8] = [
    "email",
    "correo",
    "mail",
    "@",
    "grado",
    "marca temporal",
    "timestamp",
    "fecha",
];

/// True if the column holds metadata (timestamp, email, grade, ...) and not a question.
pub fn is_admin_column(name: &str) -> bool {
    let lower = name.to_lowercase();
    ADMIN_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Splits the columns into questions, in column order.
///
/// The questions are numbered from 1. An empty result is valid.
pub fn detect_questions(columns: &[String]) -> Vec<Question> {
    let mut res: Vec<Question> = Vec::new();
    for (column, name) in columns.iter().enumerate() {
        if is_admin_column(name) {
            debug!("detect_questions: skipping admin column {:?}", name);
            continue;
        }
        res.push(Question {
            number: (res.len() + 1) as u32,
            title: name.clone(),
            column,
        });
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn admin_columns_are_case_insensitive() {
        assert!(is_admin_column("Marca temporal"));
        assert!(is_admin_column("Dirección de correo electrónico"));
        assert!(is_admin_column("TIMESTAMP"));
        assert!(is_admin_column("Grado y sección"));
        assert!(is_admin_column("contact@school"));
        assert!(!is_admin_column("¿Te gusta leer?"));
    }

    #[test]
    fn questions_keep_column_order() {
        let cols = names(&["Timestamp", "Q one", "Email", "Q two", "Fecha", "Q three"]);
        let qs = detect_questions(&cols);
        let summary: Vec<(u32, &str, usize)> = qs
            .iter()
            .map(|q| (q.number, q.title.as_str(), q.column))
            .collect();
        assert_eq!(
            summary,
            vec![(1, "Q one", 1), (2, "Q two", 3), (3, "Q three", 5)]
        );
    }

    #[test]
    fn detection_is_deterministic() {
        let cols = names(&["a", "mail", "b", "c"]);
        assert_eq!(detect_questions(&cols), detect_questions(&cols));
    }

    #[test]
    fn only_admin_columns_yield_nothing() {
        let cols = names(&["Marca temporal", "Correo"]);
        assert!(detect_questions(&cols).is_empty());
        assert!(detect_questions(&[]).is_empty());
    }
}
