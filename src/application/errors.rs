use crate::core::ports::RepositoryError;
use crate::core::schedule::decider::decision::DecideError;
use crate::core::schedule::export::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("domain rejected: {0}")]
    Domain(#[from] DecideError),

    #[error(transparent)]
    Availability(#[from] anyhow::Error),

    #[error(transparent)]
    Export(#[from] ExportError),
}
