use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_coding::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::codesheet::config_reader::*;
use crate::codesheet::io_common::{simplify_file_name, InputProvider};

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod render_xlsx;

#[derive(Debug, Snafu)]
pub enum CodeSheetError {
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The spreadsheet {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The worksheet in {path} has no header row"))]
    MissingHeader { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Invalid CSV delimiter {delimiter:?}: expected a single ASCII character"))]
    CsvDelimiter { delimiter: String },
    #[snafu(display("Error reading {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a non-negative integer for {field}"))]
    ParsingJsonNumber { field: String },
    #[snafu(display("Error writing {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing spreadsheet {path}"))]
    WritingXlsx {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("No input file: use --input or the inputSource section of the configuration"))]
    MissingInput {},
    #[snafu(display("Unknown input type {input_type:?} (expected excel or csv)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
}

type CsResult<T> = Result<T, CodeSheetError>;

/// Everything needed for one run, after merging the command line and the configuration file.
#[derive(PartialEq, Debug, Clone)]
struct RunSettings {
    input_path: String,
    provider: InputProvider,
    excel_worksheet_name: Option<String>,
    csv_delimiter: u8,
    out: Option<String>,
    summary: Option<String>,
    reference: Option<String>,
    max_respondents: Option<usize>,
    title: String,
    show_preview: bool,
    show_statistics: bool,
}

fn resolve_settings(args: &Args) -> CsResult<RunSettings> {
    let (config, root_dir) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (CodeSheetConfig::default(), PathBuf::new()),
    };

    // Paths from the configuration are relative to the configuration file.
    let in_root = |p: &String| -> String {
        let full: PathBuf = [root_dir.clone(), PathBuf::from(p)].iter().collect();
        full.display().to_string()
    };

    let source = config.input_source.clone().unwrap_or_default();
    let input_path = match (&args.input, &source.file_path) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => in_root(p),
        (None, None) => return MissingInputSnafu {}.fail(),
    };

    let input_type = args.input_type.clone().or_else(|| source.provider.clone());
    let provider = match input_type {
        Some(t) => InputProvider::parse(&t).context(UnknownInputTypeSnafu { input_type: t })?,
        None => InputProvider::from_path(&input_path),
    };

    let csv_delimiter = match &source.csv_delimiter {
        Some(d) => match d.as_bytes() {
            [b] => *b,
            _ => {
                return CsvDelimiterSnafu {
                    delimiter: d.clone(),
                }
                .fail()
            }
        },
        None => io_common::default_delimiter(&input_path),
    };

    let output = &config.output_settings;
    let max_respondents = match args.max_respondents {
        Some(x) => Some(x),
        None => config.max_respondents()?,
    };

    let show_preview = args.preview;
    let show_statistics = args.statistics;
    let out = args
        .out
        .clone()
        .or_else(|| output.output_path.as_ref().map(in_root));
    let summary = args
        .summary
        .clone()
        .or_else(|| match &output.summary_path {
            Some(p) if p == "stdout" => Some(p.clone()),
            Some(p) => Some(in_root(p)),
            None => None,
        });
    // Without any requested output, show both reports.
    let nothing_requested =
        out.is_none() && summary.is_none() && !show_preview && !show_statistics;

    Ok(RunSettings {
        input_path,
        provider,
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or_else(|| source.excel_worksheet_name.clone()),
        csv_delimiter,
        out,
        summary,
        reference: args.reference.clone(),
        max_respondents,
        title: args
            .title
            .clone()
            .or_else(|| output.sheet_title.clone())
            .unwrap_or_else(|| layout::DEFAULT_TITLE.to_string()),
        show_preview: show_preview || nothing_requested,
        show_statistics: show_statistics || nothing_requested,
    })
}

fn read_dataset(settings: &RunSettings) -> CsResult<Dataset> {
    info!(
        "Attempting to read {:?} file {:?}",
        settings.provider, settings.input_path
    );
    match settings.provider {
        InputProvider::Excel => io_excel::read_excel_dataset(
            &settings.input_path,
            settings.excel_worksheet_name.as_deref(),
        ),
        InputProvider::Csv => io_csv::read_csv_dataset(&settings.input_path, settings.csv_delimiter),
    }
}

fn stats_to_json(stats: &[QuestionStats]) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for qs in stats.iter() {
        let mut tally: Vec<JSValue> = Vec::new();
        for alt in qs.alternatives.iter() {
            tally.push(json!({
                "code": alt.code,
                "alternative": alt.alternative.to_string(),
                "frequency": alt.frequency,
                "percentage": format!("{:.1}", alt.percentage),
            }));
        }
        l.push(json!({
            "question": qs.number,
            "title": qs.title,
            "total": qs.total,
            "tally": tally,
        }));
    }
    l
}

fn build_summary_js(settings: &RunSettings, survey: &LoadedSurvey) -> JSValue {
    let exported = layout::export_count(settings.max_respondents, survey.sample_size());
    json!({
        "config": {
            "title": settings.title,
            "input": simplify_file_name(&settings.input_path),
            "sampleSize": survey.sample_size(),
            "exportedRespondents": exported,
        },
        "results": stats_to_json(&survey.statistics()),
    })
}

fn write_summary(dest: &str, pretty_js: &str) -> CsResult<()> {
    if dest == "stdout" {
        println!("{}", pretty_js);
        return Ok(());
    }
    info!("Writing summary to {:?}", dest);
    fs::write(dest, pretty_js).context(WritingFileSnafu { path: dest })
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> CsResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    info!("The summary matches the reference {:?}", reference_path);
    Ok(())
}

pub fn run(args: &Args) -> CsResult<()> {
    let settings = resolve_settings(args)?;
    debug!("settings: {:?}", settings);

    let mut processor = SurveyProcessor::new();
    let survey = processor.load_from(|| read_dataset(&settings))?;

    if settings.show_preview {
        println!("{}", survey.preview());
    }
    if settings.show_statistics {
        println!("{}", survey.statistics_report());
    }

    if let Some(out) = &settings.out {
        let options = LayoutOptions {
            export_limit: settings.max_respondents,
            title: settings.title.clone(),
        };
        let doc = survey.coding_document(&options);
        render_xlsx::write_document(&doc, out)?;
        info!("Coding sheet written to {:?}", out);
    }

    if settings.summary.is_some() || settings.reference.is_some() {
        let result_js = build_summary_js(&settings, survey);
        let pretty_js_stats =
            serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
        if let Some(dest) = &settings.summary {
            write_summary(dest, &pretty_js_stats)?;
        }
        if let Some(reference) = &settings.reference {
            check_reference(reference, &pretty_js_stats)?;
        }
    }

    Ok(())
}
