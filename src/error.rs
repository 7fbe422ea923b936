use thiserror::Error;

#[derive(Error, Debug)]
pub enum MacroChefError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("Invalid recipe config: {0}")]
    InvalidRequest(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] macrochef_common::Error),
}

pub type Result<T> = std::result::Result<T, MacroChefError>;
