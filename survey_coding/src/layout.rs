/*!
Placement of the coded answers into a printable grid.

Each exported respondent gets a block of three rows:
- a header cell `No {index}` above the last question column,
- a row of split cells, one per shown question, with the question number in the
  upper-left corner and the code in the lower-right corner,
- a blank separator row.

The result is a [`Document`]: plain cells with coordinates and styles. Writing it
to an actual spreadsheet file is the job of an external renderer.
*/

use log::{debug, info};

use crate::catalog::EncodedResponse;
use crate::dataset::Question;

/// At most this many questions are shown per respondent block.
pub const MAX_SHOWN_QUESTIONS: usize = 5;
/// Row of the first respondent block. The title occupies row 0.
pub const FIRST_BLOCK_ROW: usize = 1;
/// Column of the first question cell. Column 0 is kept for spacing.
pub const FIRST_QUESTION_COL: usize = 1;
pub const COLUMN_WIDTH: f64 = 6.0;
pub const QUESTION_ROW_HEIGHT: f64 = 22.0;
pub const DEFAULT_TITLE: &str = "Coding Sheet - Sampling";

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum HorizontalAlign {
    General,
    Center,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum VerticalAlign {
    Bottom,
    Center,
}

/// Thin borders. `diagonal` goes from the lower-left to the upper-right corner.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct Borders {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    pub diagonal: bool,
}

impl Borders {
    pub const NONE: Borders = Borders {
        left: false,
        right: false,
        top: false,
        bottom: false,
        diagonal: false,
    };

    pub const BOX: Borders = Borders {
        left: true,
        right: true,
        top: true,
        bottom: true,
        diagonal: false,
    };

    pub const BOX_DIAGONAL: Borders = Borders {
        diagonal: true,
        ..Borders::BOX
    };
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CellStyle {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    pub bold: bool,
    /// In points. `None` keeps the renderer's default.
    pub font_size: Option<u16>,
    pub wrap: bool,
    pub borders: Borders,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        horizontal: HorizontalAlign::General,
        vertical: VerticalAlign::Bottom,
        bold: false,
        font_size: None,
        wrap: false,
        borders: Borders::NONE,
    };

    pub const TITLE: CellStyle = CellStyle {
        bold: true,
        font_size: Some(12),
        ..CellStyle::PLAIN
    };

    pub const HEADER: CellStyle = CellStyle {
        horizontal: HorizontalAlign::Center,
        vertical: VerticalAlign::Center,
        bold: true,
        font_size: None,
        wrap: false,
        borders: Borders::BOX,
    };

    pub const SPLIT: CellStyle = CellStyle {
        horizontal: HorizontalAlign::Center,
        vertical: VerticalAlign::Center,
        bold: false,
        font_size: Some(11),
        wrap: true,
        borders: Borders::BOX_DIAGONAL,
    };
}

/// A cell cut in two by a diagonal line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GridCell {
    pub top_left_text: String,
    pub bottom_right_text: String,
    pub diagonal: bool,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CellContent {
    Text(String),
    Split(GridCell),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PlacedCell {
    /// 0-based.
    pub row: usize,
    /// 0-based.
    pub col: usize,
    pub content: CellContent,
    pub style: CellStyle,
}

/// One respondent, before placement.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RespondentBlock {
    /// 1-based position in the exported subset.
    pub export_index: usize,
    /// 0-based position of the respondent in the dataset.
    pub row: usize,
    pub header: String,
    pub cells: Vec<GridCell>,
}

/// The output of the layout: what to write, where, and how it looks.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Document {
    pub sheet_name: String,
    pub cells: Vec<PlacedCell>,
    pub column_widths: Vec<(usize, f64)>,
    pub row_heights: Vec<(usize, f64)>,
}

impl Document {
    /// The header cells, one per respondent block.
    pub fn headers(&self) -> impl Iterator<Item = &PlacedCell> + '_ {
        self.cells
            .iter()
            .filter(|c| c.style == CellStyle::HEADER)
    }

    /// The split cells of a given row.
    pub fn split_cells_in_row(&self, row: usize) -> Vec<&GridCell> {
        self.cells
            .iter()
            .filter(|c| c.row == row)
            .filter_map(|c| match &c.content {
                CellContent::Split(g) => Some(g),
                CellContent::Text(_) => None,
            })
            .collect()
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&PlacedCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LayoutOptions {
    /// 0 or `None` exports every respondent.
    pub export_limit: Option<usize>,
    /// Used both as the sheet name and as the title cell.
    pub title: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            export_limit: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// The number of respondents to export out of `row_count`.
pub fn export_count(export_limit: Option<usize>, row_count: usize) -> usize {
    match export_limit {
        Some(limit) if limit > 0 => limit.min(row_count),
        _ => row_count,
    }
}

/// Builds the respondent blocks for the first `export_limit` respondents.
///
/// Only the first [`MAX_SHOWN_QUESTIONS`] questions appear. Without any question,
/// there is no block at all.
pub fn plan_blocks(
    questions: &[Question],
    encoded: &[EncodedResponse],
    export_limit: Option<usize>,
) -> Vec<RespondentBlock> {
    let shown = &questions[..questions.len().min(MAX_SHOWN_QUESTIONS)];
    if shown.is_empty() {
        info!("plan_blocks: no question detected, nothing to lay out");
        return vec![];
    }
    let count = export_count(export_limit, encoded.len());
    info!(
        "plan_blocks: exporting {} of {} respondents, {} questions shown",
        count,
        encoded.len(),
        shown.len()
    );

    encoded[..count]
        .iter()
        .enumerate()
        .map(|(idx, resp)| {
            let export_index = idx + 1;
            let cells = shown
                .iter()
                .map(|q| GridCell {
                    top_left_text: q.number.to_string(),
                    bottom_right_text: resp
                        .code_for(q.number)
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                    diagonal: true,
                })
                .collect();
            RespondentBlock {
                export_index,
                row: resp.row,
                header: format!("No {}", export_index),
                cells,
            }
        })
        .collect()
}

/// Places the blocks into a document, one under the other.
pub fn place_blocks(blocks: &[RespondentBlock], title: &str) -> Document {
    let mut doc = Document {
        sheet_name: title.to_string(),
        ..Document::default()
    };
    doc.cells.push(PlacedCell {
        row: 0,
        col: 0,
        content: CellContent::Text(title.to_string()),
        style: CellStyle::TITLE,
    });

    let num_cols = blocks.iter().map(|b| b.cells.len()).max().unwrap_or(0);
    if num_cols > 0 {
        doc.column_widths.push((0, COLUMN_WIDTH));
        for j in 0..num_cols {
            doc.column_widths.push((FIRST_QUESTION_COL + j, COLUMN_WIDTH));
        }
    }

    let mut current_row = FIRST_BLOCK_ROW;
    for block in blocks.iter() {
        if block.cells.is_empty() {
            continue;
        }
        let header_row = current_row;
        doc.cells.push(PlacedCell {
            row: header_row,
            col: FIRST_QUESTION_COL + block.cells.len() - 1,
            content: CellContent::Text(block.header.clone()),
            style: CellStyle::HEADER,
        });

        let question_row = header_row + 1;
        for (j, cell) in block.cells.iter().enumerate() {
            doc.cells.push(PlacedCell {
                row: question_row,
                col: FIRST_QUESTION_COL + j,
                content: CellContent::Split(cell.clone()),
                style: CellStyle::SPLIT,
            });
        }
        doc.row_heights.push((question_row, QUESTION_ROW_HEIGHT));
        debug!(
            "place_blocks: block {} (dataset row {}) at rows {}-{}",
            block.export_index, block.row, header_row, question_row
        );

        // Leave a blank line before the next respondent.
        current_row = question_row + 2;
    }
    doc
}

/// Lays out the coding sheet of the encoded respondents.
pub fn build_document(
    questions: &[Question],
    encoded: &[EncodedResponse],
    options: &LayoutOptions,
) -> Document {
    let blocks = plan_blocks(questions, encoded, options.export_limit);
    place_blocks(&blocks, &options.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_catalogs, encode_all};
    use crate::dataset::{Dataset, RawValue};
    use crate::detect::detect_questions;
    use crate::test_util::scenario_a;

    fn wide_dataset(num_rows: usize, num_questions: usize) -> Dataset {
        let columns = (0..num_questions).map(|i| format!("Q{}", i + 1)).collect();
        let rows = (0..num_rows)
            .map(|r| {
                (0..num_questions)
                    .map(|q| RawValue::Number(((r + q) % 3) as f64))
                    .collect()
            })
            .collect();
        Dataset::new(columns, rows)
    }

    fn document_of(ds: &Dataset, options: &LayoutOptions) -> Document {
        let questions = detect_questions(&ds.columns);
        let cats = build_catalogs(&questions, ds);
        let encoded = encode_all(ds, &cats);
        build_document(&questions, &encoded, options)
    }

    #[test]
    fn export_count_limits() {
        assert_eq!(export_count(None, 4), 4);
        assert_eq!(export_count(Some(0), 4), 4);
        assert_eq!(export_count(Some(2), 4), 2);
        assert_eq!(export_count(Some(9), 4), 4);
    }

    #[test]
    fn scenario_a_layout() {
        let doc = document_of(&scenario_a(), &LayoutOptions::default());
        assert_eq!(doc.headers().count(), 3);

        let title = doc.cell_at(0, 0).unwrap();
        assert_eq!(title.content, CellContent::Text(DEFAULT_TITLE.to_string()));

        // First block: header above the last of the two question columns.
        let header = doc.cell_at(1, 2).unwrap();
        assert_eq!(header.content, CellContent::Text("No 1".to_string()));
        assert_eq!(header.style, CellStyle::HEADER);

        let row = doc.split_cells_in_row(2);
        let texts: Vec<(&str, &str)> = row
            .iter()
            .map(|g| (g.top_left_text.as_str(), g.bottom_right_text.as_str()))
            .collect();
        assert_eq!(texts, vec![("1", "2"), ("2", "1")]);
        assert!(row.iter().all(|g| g.diagonal));

        // Third block starts after two blocks of three rows.
        let third = doc.split_cells_in_row(8);
        assert_eq!(third[1].bottom_right_text, "0");
        assert_eq!(
            doc.cell_at(7, 2).unwrap().content,
            CellContent::Text("No 3".to_string())
        );
        assert_eq!(doc.row_heights, vec![(2, 22.0), (5, 22.0), (8, 22.0)]);
    }

    #[test]
    fn limit_keeps_the_first_respondents() {
        let ds = wide_dataset(5, 3);
        let questions = detect_questions(&ds.columns);
        let cats = build_catalogs(&questions, &ds);
        let encoded = encode_all(&ds, &cats);
        let blocks = plan_blocks(&questions, &encoded, Some(2));
        let summary: Vec<(usize, usize, &str)> = blocks
            .iter()
            .map(|b| (b.export_index, b.row, b.header.as_str()))
            .collect();
        assert_eq!(summary, vec![(1, 0, "No 1"), (2, 1, "No 2")]);

        let doc = place_blocks(&blocks, "t");
        assert_eq!(doc.headers().count(), 2);
    }

    #[test]
    fn at_most_five_questions_are_shown() {
        let ds = wide_dataset(4, 8);
        let doc = document_of(&ds, &LayoutOptions::default());
        assert_eq!(doc.headers().count(), 4);
        for block in 0..4 {
            let row = FIRST_BLOCK_ROW + 3 * block + 1;
            let cells = doc.split_cells_in_row(row);
            assert_eq!(cells.len(), MAX_SHOWN_QUESTIONS);
            let numbers: Vec<&str> = cells.iter().map(|g| g.top_left_text.as_str()).collect();
            assert_eq!(numbers, vec!["1", "2", "3", "4", "5"]);
        }
        let header = doc.headers().next().unwrap();
        assert_eq!(header.col, FIRST_QUESTION_COL + MAX_SHOWN_QUESTIONS - 1);
        assert_eq!(doc.column_widths.len(), 1 + MAX_SHOWN_QUESTIONS);
    }

    #[test]
    fn no_question_means_no_block() {
        let ds = Dataset::new(
            vec!["Timestamp".to_string(), "Email".to_string()],
            vec![vec![RawValue::Number(1.0), RawValue::text("a@b.c")]; 3],
        );
        let doc = document_of(&ds, &LayoutOptions::default());
        assert_eq!(doc.headers().count(), 0);
        assert_eq!(doc.cells.len(), 1);
        assert!(doc.row_heights.is_empty());
        assert!(doc.column_widths.is_empty());
    }

    #[test]
    fn absent_code_gives_empty_text() {
        let questions = vec![
            Question {
                number: 1,
                title: "a".to_string(),
                column: 0,
            },
            Question {
                number: 2,
                title: "b".to_string(),
                column: 1,
            },
        ];
        let encoded = vec![EncodedResponse {
            row: 0,
            codes: vec![(1, 4)],
        }];
        let blocks = plan_blocks(&questions, &encoded, None);
        assert_eq!(blocks[0].cells[1].bottom_right_text, "");
        assert_eq!(blocks[0].cells[0].bottom_right_text, "4");
    }
}
