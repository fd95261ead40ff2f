//! Error types for upstream fetches.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The upstream dataset a fetch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Countries,
    Rates,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Countries => "countries",
            Dataset::Rates => "rates",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while talking to an upstream source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The dataset could not be obtained: transport failure, timeout,
    /// non-success status or an undecodable payload.
    #[error("Upstream {dataset} unavailable: {message}")]
    Unavailable {
        /// Which dataset failed
        dataset: Dataset,
        /// Human readable cause
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl SourceError {
    pub fn unavailable(dataset: Dataset, message: impl Into<String>) -> Self {
        SourceError::Unavailable {
            dataset,
            message: message.into(),
        }
    }

    /// The dataset this error refers to, if any.
    pub fn dataset(&self) -> Option<Dataset> {
        match self {
            SourceError::Unavailable { dataset, .. } => Some(*dataset),
            SourceError::Client(_) => None,
        }
    }
}
