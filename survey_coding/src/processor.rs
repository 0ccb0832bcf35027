use log::info;

use crate::catalog::{build_catalogs, encode_all, AlternativeCatalog, EncodedResponse};
use crate::config::CodingErrors;
use crate::dataset::{Dataset, Question};
use crate::detect::detect_questions;
use crate::layout::{build_document, Document, LayoutOptions};
use crate::report::{preview_text, statistics_text};
use crate::stats::{compute_statistics, QuestionStats};

/// A dataset together with everything derived from it at load time.
///
/// Nothing in here changes after construction.
#[derive(PartialEq, Debug, Clone)]
pub struct LoadedSurvey {
    dataset: Dataset,
    questions: Vec<Question>,
    catalogs: Vec<AlternativeCatalog>,
}

impl LoadedSurvey {
    pub fn new(dataset: Dataset) -> LoadedSurvey {
        let questions = detect_questions(&dataset.columns);
        let catalogs = build_catalogs(&questions, &dataset);
        info!(
            "LoadedSurvey::new: {} respondents, {} columns, {} questions",
            dataset.sample_size(),
            dataset.columns.len(),
            questions.len()
        );
        for cat in catalogs.iter() {
            info!(
                "Question {}: {} ({} alternatives)",
                cat.question.number,
                cat.question.title,
                cat.len()
            );
        }
        LoadedSurvey {
            dataset,
            questions,
            catalogs,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn sample_size(&self) -> usize {
        self.dataset.sample_size()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn catalogs(&self) -> &[AlternativeCatalog] {
        &self.catalogs
    }

    pub fn encode(&self) -> Vec<EncodedResponse> {
        encode_all(&self.dataset, &self.catalogs)
    }

    pub fn statistics(&self) -> Vec<QuestionStats> {
        compute_statistics(&self.catalogs, &self.dataset)
    }

    pub fn preview(&self) -> String {
        preview_text(self.sample_size(), &self.catalogs)
    }

    pub fn statistics_report(&self) -> String {
        statistics_text(self.sample_size(), &self.statistics())
    }

    pub fn coding_document(&self, options: &LayoutOptions) -> Document {
        build_document(&self.questions, &self.encode(), options)
    }
}

/// Holds at most one loaded survey at a time.
///
/// All the operations fail with [`CodingErrors::NotLoaded`] until a dataset
/// has been loaded successfully.
#[derive(Debug, Default)]
pub struct SurveyProcessor {
    loaded: Option<LoadedSurvey>,
}

impl SurveyProcessor {
    pub fn new() -> SurveyProcessor {
        SurveyProcessor { loaded: None }
    }

    /// Replaces the current survey, if any.
    pub fn load(&mut self, dataset: Dataset) -> &LoadedSurvey {
        self.loaded.insert(LoadedSurvey::new(dataset))
    }

    /// Drops the current survey, then loads the output of `read`.
    ///
    /// If `read` fails, its error is returned untouched and nothing stays loaded.
    pub fn load_from<E, F>(&mut self, read: F) -> Result<&LoadedSurvey, E>
    where
        F: FnOnce() -> Result<Dataset, E>,
    {
        self.reset();
        let dataset = read()?;
        Ok(self.load(dataset))
    }

    pub fn reset(&mut self) {
        self.loaded = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn session(&self) -> Result<&LoadedSurvey, CodingErrors> {
        self.loaded.as_ref().ok_or(CodingErrors::NotLoaded)
    }

    pub fn questions(&self) -> Result<&[Question], CodingErrors> {
        Ok(self.session()?.questions())
    }

    pub fn catalogs(&self) -> Result<&[AlternativeCatalog], CodingErrors> {
        Ok(self.session()?.catalogs())
    }

    pub fn encode(&self) -> Result<Vec<EncodedResponse>, CodingErrors> {
        Ok(self.session()?.encode())
    }

    pub fn statistics(&self) -> Result<Vec<QuestionStats>, CodingErrors> {
        Ok(self.session()?.statistics())
    }

    pub fn preview(&self) -> Result<String, CodingErrors> {
        Ok(self.session()?.preview())
    }

    pub fn statistics_report(&self) -> Result<String, CodingErrors> {
        Ok(self.session()?.statistics_report())
    }

    pub fn coding_document(&self, options: &LayoutOptions) -> Result<Document, CodingErrors> {
        Ok(self.session()?.coding_document(options))
    }
}
