use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Validation(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to render document {key}: {message}")]
    Render { key: String, message: String },

    #[error("Document generation cancelled")]
    Cancelled,

    #[error("Api Error: {0}")]
    Api(String),
}

impl AgendaError {
    pub fn validation(message: impl Into<String>) -> Self {
        AgendaError::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AgendaError>;
