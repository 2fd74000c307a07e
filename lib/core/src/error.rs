use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog load failed: {0}")]
    Load(String),

    #[error("Titles not found in catalog: {}", .0.join(", "))]
    TitlesNotFound(Vec<String>),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Titles that failed to resolve, if this is a lookup failure.
    pub fn missing_titles(&self) -> Option<&[String]> {
        match self {
            Error::TitlesNotFound(titles) => Some(titles),
            _ => None,
        }
    }
}
