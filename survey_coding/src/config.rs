// ********* Errors **********

use std::error::Error;
use std::fmt::Display;

/// Errors that prevent an operation from running.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CodingErrors {
    /// No dataset has been loaded yet, or the last load failed.
    NotLoaded,
}

impl Error for CodingErrors {}

impl Display for CodingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodingErrors::NotLoaded => write!(f, "no survey data loaded: load a dataset first"),
        }
    }
}
