/*!
Coding sheets for survey responses.

This crate turns a raw response table into:
- a numeric code for every answer, by sorting the distinct answers of each question,
- a frequency table for every question,
- a printable grid (the "coding sheet") with one block per respondent.

Everything happens in one pass over an in-memory [`Dataset`]:

```
use survey_coding::*;

let dataset = Dataset::new(
    vec!["Timestamp".to_string(), "Do you read?".to_string()],
    vec![
        vec![RawValue::Number(44927.5), RawValue::text("Yes")],
        vec![RawValue::Number(44927.6), RawValue::text("No")],
        vec![RawValue::Number(44927.7), RawValue::Missing],
    ],
);

let mut processor = SurveyProcessor::new();
let survey = processor.load(dataset);

// The timestamp column is not a question.
assert_eq!(survey.questions().len(), 1);
// "No" < "Yes": No is coded 1, Yes is coded 2, the missing answer is 0.
let codes: Vec<u32> = survey.encode().iter().map(|e| e.codes[0].1).collect();
assert_eq!(codes, vec![2, 1, 0]);

let stats = survey.statistics();
assert_eq!(stats[0].total, 2);
assert_eq!(stats[0].alternatives[0].percentage, 50.0);

let doc = survey.coding_document(&LayoutOptions::default());
assert_eq!(doc.headers().count(), 3);
# Ok::<(), CodingErrors>(())
```

The document is independent of any file format. See the `codesheet` program for
an Excel renderer.
*/

mod config;
pub mod catalog;
pub mod dataset;
pub mod detect;
pub mod layout;
pub mod processor;
pub mod report;
pub mod stats;

pub use crate::catalog::{AlternativeCatalog, EncodedResponse, MISSING_CODE};
pub use crate::config::*;
pub use crate::dataset::{Dataset, Question, RawValue};
pub use crate::layout::{
    Borders, CellContent, CellStyle, Document, GridCell, HorizontalAlign, LayoutOptions,
    PlacedCell, RespondentBlock, VerticalAlign,
};
pub use crate::processor::{LoadedSurvey, SurveyProcessor};
pub use crate::stats::{AlternativeStats, QuestionStats};

#[cfg(test)]
pub(crate) mod test_util {
    use crate::dataset::{Dataset, RawValue};

    /// Three respondents, A = [Yes, No, Yes], B = [1, 2, missing].
    pub fn scenario_a() -> Dataset {
        Dataset::new(
            vec!["A".to_string(), "B".to_string()],
            vec![
                vec![RawValue::text("Yes"), RawValue::Number(1.0)],
                vec![RawValue::text("No"), RawValue::Number(2.0)],
                vec![RawValue::text("Yes"), RawValue::Missing],
            ],
        )
    }
}
