use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("invalid column selection: {0}")]
    InvalidColumnSelection(String),
    #[error("stats fetch failed: {0}")]
    FetchFailure(String),
    #[error("stats fetch timed out after {0:?}")]
    FetchTimeout(Duration),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Other(String),
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::FetchFailure(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
