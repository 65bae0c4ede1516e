use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UtilsError {
    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
}
