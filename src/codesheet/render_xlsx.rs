// Writes a coding sheet document to an Excel workbook.

use rust_xlsxwriter::{
    Format, FormatAlign, FormatBorder, FormatDiagonalBorder, Workbook, XlsxError,
};

use crate::codesheet::*;

/// Text of a split cell: the question number goes to the upper-left corner and
/// the code to the lower-right corner, on two lines.
pub fn split_cell_text(cell: &GridCell) -> String {
    format!("{}   \n   {}", cell.top_left_text, cell.bottom_right_text)
}

fn build_excel_format(style: &CellStyle) -> Format {
    let mut format = Format::new();

    if style.bold {
        format = format.set_bold();
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }

    format = match style.horizontal {
        HorizontalAlign::General => format,
        HorizontalAlign::Center => format.set_align(FormatAlign::Center),
    };
    format = match style.vertical {
        VerticalAlign::Bottom => format,
        VerticalAlign::Center => format.set_align(FormatAlign::VerticalCenter),
    };
    if style.wrap {
        format = format.set_text_wrap();
    }

    let borders = &style.borders;
    if borders.left {
        format = format.set_border_left(FormatBorder::Thin);
    }
    if borders.right {
        format = format.set_border_right(FormatBorder::Thin);
    }
    if borders.top {
        format = format.set_border_top(FormatBorder::Thin);
    }
    if borders.bottom {
        format = format.set_border_bottom(FormatBorder::Thin);
    }
    if borders.diagonal {
        format = format
            .set_border_diagonal(FormatBorder::Thin)
            .set_border_diagonal_type(FormatDiagonalBorder::BorderUp);
    }

    format
}

/// Builds the in-memory workbook with a single worksheet.
pub fn render_document(doc: &Document) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&doc.sheet_name)?;

    for (col, width) in doc.column_widths.iter() {
        worksheet.set_column_width(*col as u16, *width)?;
    }
    for (row, height) in doc.row_heights.iter() {
        worksheet.set_row_height(*row as u32, *height)?;
    }

    for cell in doc.cells.iter() {
        let format = build_excel_format(&cell.style);
        let text = match &cell.content {
            CellContent::Text(s) => s.clone(),
            CellContent::Split(g) => split_cell_text(g),
        };
        worksheet.write_string_with_format(cell.row as u32, cell.col as u16, &text, &format)?;
    }
    debug!(
        "render_document: {} cells in worksheet {:?}",
        doc.cells.len(),
        doc.sheet_name
    );
    Ok(workbook)
}

/// Renders the document and saves it. Nothing is written if rendering fails.
pub fn write_document(doc: &Document, path: &str) -> CsResult<()> {
    let mut workbook = render_document(doc).context(WritingXlsxSnafu { path })?;
    workbook.save(path).context(WritingXlsxSnafu { path })
}
