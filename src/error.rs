pub type CrtResult<T> = Result<T, CrtError>;

#[derive(thiserror::Error, Debug)]
pub enum CrtError {
    #[error("precondition violation: {0}")]
    Precondition(String),

    #[error("config out of range: {0}")]
    ConfigOutOfRange(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CrtError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigOutOfRange(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
