use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Could not connect to '{uri}': {reason}")]
    Connection { uri: String, reason: String },

    #[error("Store write failed: {0}")]
    StoreWrite(String),

    #[error("Store read failed: {0}")]
    StoreRead(String),

    #[error("No tasks found")]
    EmptyResult,

    #[error("No task named '{0}'")]
    NotFound(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TodoError>;
