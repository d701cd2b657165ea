use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The table cannot be laid out on the requested page.
    #[error("Layout error: {0}")]
    Layout(String),

    /// The document encoder rejected the content.
    #[error("Render error ({format}): {message}")]
    Render {
        format: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UsineError {
    pub fn render(format: &'static str, message: impl Into<String>) -> Self {
        Self::Render {
            format,
            message: message.into(),
        }
    }
}
