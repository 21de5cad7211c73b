use thiserror::Error;

/// Failure to obtain or parse the wait-time dataset. Terminal for the source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetching {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("fetching {url}: server answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV missing '{0}' column")]
    MissingColumn(String),
    #[error("row {row}, {column}: '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("row {row}, {column}: '{value}' is not a 0/1 flag")]
    InvalidFlag {
        row: usize,
        column: String,
        value: String,
    },
    #[error("row {row}: empty '{column}'")]
    EmptyField { row: usize, column: String },
}

/// A filter parameter that does not name anything in the loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidParameter {
    #[error("unknown park '{0}'")]
    UnknownPark(String),
    #[error("unknown day '{0}'")]
    UnknownDay(String),
    #[error("unknown time of day '{0}'")]
    UnknownSlot(String),
}
