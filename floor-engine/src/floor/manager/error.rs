use crate::floor::validation::ValidationError;
use shared::error::AppError;
use thiserror::Error;

/// Manager errors
///
/// Only rejected input surfaces here. Unknown ids are no-ops and storage
/// failures are reported as notices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManagerError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Validation(e) => e.into(),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
