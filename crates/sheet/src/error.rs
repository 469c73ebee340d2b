use thiserror::Error;

/// Errors that can occur while decoding or encoding sheets
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("XLSX error: {0}")]
    Xlsx(String),

    #[error("Sheet is too large to write: {0}")]
    TooLarge(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    pub(crate) fn xlsx(err: impl std::fmt::Display) -> Self {
        SheetError::Xlsx(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
