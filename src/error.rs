use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AvgError>;

#[derive(Error, Debug)]
pub enum AvgError {
    #[error("can't access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("{}: missing header line", .path.display())]
    MissingHeader { path: PathBuf },

    #[error("{}:{line}: expected at least 4 tab separated fields, found {fields}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        fields: usize,
    },

    #[error("{}:{line}: no values to average after the first 3 fields", .path.display())]
    EmptyTail { path: PathBuf, line: usize },

    #[error("{}:{line}: column {column} is not a number: {value:?}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("{failed} of {total} files failed")]
    Failed { failed: usize, total: usize },
}

impl AvgError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AvgError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from the value columns before a file and line are attached.
#[derive(Error, Debug, PartialEq)]
pub enum MeanError {
    #[error("no values to average")]
    Empty,
    #[error("value {index} is not a number: {value:?}")]
    Parse {
        index: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}
