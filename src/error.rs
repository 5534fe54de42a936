pub type SlidereelResult<T> = Result<T, SlidereelError>;

#[derive(thiserror::Error, Debug)]
pub enum SlidereelError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("image decode error: {0}")]
    ImageDecode(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidereelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
