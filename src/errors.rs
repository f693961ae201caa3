use thiserror::Error;

use crate::generation::GenerationError;
use crate::store::IoError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

pub type AppResult<T> = Result<T, AppError>;
