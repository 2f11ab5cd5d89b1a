use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("failed to open file: {}", .path.display())]
    ResourceAcquisition { path: PathBuf, source: io::Error },

    #[error("failed to read file: {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

/// Coarse classification of a [`SummarizeError`] for exit-status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ResourceAcquisitionFailure,
}

impl SummarizeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SummarizeError::InvalidArgument(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SummarizeError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SummarizeError::ResourceAcquisition { .. } | SummarizeError::Read { .. } => {
                ErrorKind::ResourceAcquisitionFailure
            }
        }
    }
}

pub type SummarizeResult<T> = Result<T, SummarizeError>;
