use clap::Parser;

/// This program builds coding sheets and frequency tables out of survey responses.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the input and the outputs.
    /// The other command line options override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The survey responses: an Excel workbook (xlsx, xls, ods) or a CSV file.
    /// The first row must contain the column names.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (excel or csv) The type of the input. By default, it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path) If specified, the coding sheet is written as an Excel workbook to this location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or 'stdout') If specified, the frequency tables are written in JSON format to
    /// the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference file containing the frequency tables in JSON format. If provided,
    /// the program checks that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default 0) The number of respondents to put in the coding sheet, starting from the first
    /// row. 0 exports all of them.
    #[clap(short, long, value_parser)]
    pub max_respondents: Option<usize>,

    /// When using an Excel file, the name of the worksheet to read. The first worksheet is used
    /// by default.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// The title of the coding sheet, also used as the name of the worksheet.
    #[clap(long, value_parser)]
    pub title: Option<String>,

    /// Prints the detected questions and their alternatives.
    #[clap(long, takes_value = false)]
    pub preview: bool,

    /// Prints the frequency table of every question.
    #[clap(long, takes_value = false)]
    pub statistics: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
