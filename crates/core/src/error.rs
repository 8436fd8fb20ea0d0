/// Result alias that carries the custom [`ParticleFieldError`] type.
pub type Result<T> = std::result::Result<T, ParticleFieldError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum ParticleFieldError {
    /// Free-form failure surfaced by a host integration, such as an audio
    /// backend refusing to start playback.
    #[error("{0}")]
    Message(String),
    /// A configuration value is outside the range the field can work with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration files that fail to parse.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Recorded frames that fail to encode or save.
    #[error("{0}")]
    Image(#[from] image::ImageError),
}

impl ParticleFieldError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    /// Creates an error for a configuration value the field cannot use.
    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<&str> for ParticleFieldError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for ParticleFieldError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
