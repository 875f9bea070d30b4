//! Errors surfaced by the task list view-model.

use thiserror::Error;

use crate::api::ApiError;
use crate::task::TaskId;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("A claim for task {0} is already in progress")]
    ClaimInFlight(TaskId),

    #[error("Unsupported file {0}: expected an Excel file (.xlsx or .xls)")]
    UnsupportedFile(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl TrackerError {
    /// The underlying API error, if the failure came from the backend.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}
