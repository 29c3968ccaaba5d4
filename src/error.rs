use thiserror::Error;

/// Errors raised while serving one advice request.
///
/// Video search failures never appear here: they are recovered inside the
/// video lookup and rendered as inline markup.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("advice generation failed: {0}")]
    AdviceGeneration(String),

    #[error("advice generation timed out after {0} seconds")]
    AdviceTimeout(u64),
}

/// Startup configuration failures. Raised once in main before the server
/// binds; the process exits instead of serving without credentials.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingCredential(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
