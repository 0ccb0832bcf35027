use log::debug;

use crate::dataset::{compare_alternatives, Dataset, Question, RawValue};

/// Code reserved for a missing or unrecognized answer. Real alternatives start at 1.
pub const MISSING_CODE: u32 = 0;

/// The distinct answers observed for one question, in code order.
///
/// The code of an alternative is its 1-based position in `alternatives`.
#[derive(PartialEq, Debug, Clone)]
pub struct AlternativeCatalog {
    pub question: Question,
    alternatives: Vec<RawValue>,
}

impl AlternativeCatalog {
    /// Collects, deduplicates and sorts the non-missing values of the question's column.
    pub fn build(question: &Question, dataset: &Dataset) -> AlternativeCatalog {
        let mut alternatives: Vec<RawValue> = dataset
            .column_values(question.column)
            .filter(|v| !v.is_missing())
            .map(RawValue::normalized)
            .collect();
        let numeric = alternatives.iter().all(|v| v.is_number());
        alternatives.sort_by(|a, b| compare_alternatives(a, b, numeric));
        alternatives.dedup();
        debug!(
            "AlternativeCatalog::build: question {} ({:?}): {} alternatives, numeric: {}",
            question.number,
            question.title,
            alternatives.len(),
            numeric
        );
        AlternativeCatalog {
            question: question.clone(),
            alternatives,
        }
    }

    pub fn alternatives(&self) -> &[RawValue] {
        &self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// The code of a value: its 1-based rank, or `MISSING_CODE` if the value is
    /// missing or was never observed.
    pub fn code_of(&self, value: &RawValue) -> u32 {
        if value.is_missing() {
            return MISSING_CODE;
        }
        self.alternatives
            .iter()
            .position(|alt| alt == value)
            .map(|idx| (idx + 1) as u32)
            .unwrap_or(MISSING_CODE)
    }

    /// The alternatives with their codes.
    pub fn coded(&self) -> impl Iterator<Item = (u32, &RawValue)> + '_ {
        self.alternatives
            .iter()
            .enumerate()
            .map(|(idx, alt)| ((idx + 1) as u32, alt))
    }
}

/// Builds the catalogs of all the questions, in question order.
pub fn build_catalogs(questions: &[Question], dataset: &Dataset) -> Vec<AlternativeCatalog> {
    questions
        .iter()
        .map(|q| AlternativeCatalog::build(q, dataset))
        .collect()
}

/// The coded answers of one respondent: one `(question number, code)` pair per question.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EncodedResponse {
    /// 0-based position of the respondent in the dataset.
    pub row: usize,
    pub codes: Vec<(u32, u32)>,
}

impl EncodedResponse {
    /// The code given for a question number, if that question was encoded.
    pub fn code_for(&self, question_number: u32) -> Option<u32> {
        self.codes
            .iter()
            .find(|(q, _)| *q == question_number)
            .map(|(_, code)| *code)
    }
}

/// Encodes one row of the dataset against the catalogs.
pub fn encode_respondent(
    dataset: &Dataset,
    row: usize,
    catalogs: &[AlternativeCatalog],
) -> EncodedResponse {
    let codes = catalogs
        .iter()
        .map(|cat| {
            let value = dataset.value(row, cat.question.column);
            (cat.question.number, cat.code_of(value))
        })
        .collect();
    EncodedResponse { row, codes }
}

/// Encodes every respondent, in row order.
pub fn encode_all(dataset: &Dataset, catalogs: &[AlternativeCatalog]) -> Vec<EncodedResponse> {
    (0..dataset.sample_size())
        .map(|row| encode_respondent(dataset, row, catalogs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect_questions;
    use crate::test_util::scenario_a;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn scenario_a_catalogs() {
        let ds = scenario_a();
        let cats = build_catalogs(&detect_questions(&ds.columns), &ds);
        assert_eq!(cats[0].alternatives(), &[text("No"), text("Yes")]);
        assert_eq!(
            cats[1].alternatives(),
            &[RawValue::Number(1.0), RawValue::Number(2.0)]
        );
    }

    #[test]
    fn scenario_a_encoding() {
        let ds = scenario_a();
        let cats = build_catalogs(&detect_questions(&ds.columns), &ds);
        let codes: Vec<Vec<(u32, u32)>> =
            encode_all(&ds, &cats).into_iter().map(|e| e.codes).collect();
        assert_eq!(
            codes,
            vec![
                vec![(1, 2), (2, 1)],
                vec![(1, 1), (2, 2)],
                vec![(1, 2), (2, 0)]
            ]
        );
    }

    #[test]
    fn numbers_sort_by_value() {
        let ds = Dataset::new(
            vec!["n".to_string()],
            vec![
                vec![RawValue::Number(10.0)],
                vec![RawValue::Number(9.0)],
                vec![RawValue::Number(10.0)],
                vec![RawValue::Missing],
            ],
        );
        let cats = build_catalogs(&detect_questions(&ds.columns), &ds);
        assert_eq!(
            cats[0].alternatives(),
            &[RawValue::Number(9.0), RawValue::Number(10.0)]
        );
    }

    #[test]
    fn mixed_values_sort_by_printed_form() {
        let ds = Dataset::new(
            vec!["m".to_string()],
            vec![
                vec![text("b")],
                vec![RawValue::Number(10.0)],
                vec![RawValue::Number(9.0)],
                vec![text("1")],
            ],
        );
        let cats = build_catalogs(&detect_questions(&ds.columns), &ds);
        let printed: Vec<String> = cats[0].alternatives().iter().map(|v| v.to_string()).collect();
        assert_eq!(printed, vec!["1", "10", "9", "b"]);
    }

    #[test]
    fn negative_zero_shares_the_code_of_zero() {
        let ds = Dataset::new(
            vec!["z".to_string()],
            vec![
                vec![RawValue::Number(-0.0)],
                vec![RawValue::Number(-1.0)],
                vec![RawValue::Number(0.0)],
                vec![text("x")],
            ],
        );
        let cats = build_catalogs(&detect_questions(&ds.columns), &ds);
        let printed: Vec<String> = cats[0].alternatives().iter().map(|v| v.to_string()).collect();
        assert_eq!(printed, vec!["-1", "0", "x"]);
        assert_eq!(cats[0].code_of(&RawValue::Number(0.0)), 2);
        assert_eq!(cats[0].code_of(&RawValue::Number(-0.0)), 2);
        let codes: Vec<u32> = encode_all(&ds, &cats).iter().map(|e| e.codes[0].1).collect();
        assert_eq!(codes, vec![2, 1, 2, 3]);
    }

    #[test]
    fn codes_are_dense() {
        let ds = Dataset::new(
            vec!["c".to_string()],
            vec!["d", "a", "c", "a", "b", "d"]
                .into_iter()
                .map(|s| vec![text(s)])
                .collect(),
        );
        let cat = AlternativeCatalog::build(&detect_questions(&ds.columns)[0], &ds);
        let codes: Vec<u32> = cat.coded().map(|(c, _)| c).collect();
        assert_eq!(codes, (1..=4).collect::<Vec<u32>>());
        for alt in cat.alternatives() {
            assert_ne!(cat.code_of(alt), MISSING_CODE);
        }
    }

    #[test]
    fn missing_and_unknown_values_get_the_missing_code() {
        let ds = scenario_a();
        let cats = build_catalogs(&detect_questions(&ds.columns), &ds);
        for cat in cats.iter() {
            assert_eq!(cat.code_of(&RawValue::Missing), MISSING_CODE);
        }
        assert_eq!(cats[0].code_of(&text("Maybe")), MISSING_CODE);
        // Text "1" is not the number 1.
        assert_eq!(cats[1].code_of(&text("1")), MISSING_CODE);
    }

    #[test]
    fn catalogs_are_deterministic() {
        let rows_a = vec![vec![text("x")], vec![text("z")], vec![text("y")]];
        let mut rows_b = rows_a.clone();
        rows_b.reverse();
        let cols = vec!["q".to_string()];
        let qa = detect_questions(&cols);
        let a = AlternativeCatalog::build(&qa[0], &Dataset::new(cols.clone(), rows_a));
        let b = AlternativeCatalog::build(&qa[0], &Dataset::new(cols, rows_b));
        assert_eq!(a, b);
    }

    #[test]
    fn code_for_looks_up_by_question_number() {
        let e = EncodedResponse {
            row: 0,
            codes: vec![(1, 3), (2, 0)],
        };
        assert_eq!(e.code_for(2), Some(0));
        assert_eq!(e.code_for(7), None);
    }
}
