use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("MongoDB request failed: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Local store error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Local store not found: {0}")]
    MissingStore(String),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SourceError>;
