use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Meta Graph API error: {0}")]
    MetaApi(String),

    #[error("Google Sheets API error: {0}")]
    Sheets(String),

    #[error("Google authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to map insight record: {0}")]
    Mapping(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, AppError>;
