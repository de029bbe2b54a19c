use thiserror::Error;

/// Main error type for zyntra
#[derive(Error, Debug)]
pub enum ZyntraError {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authentication required. Please run 'zyntra auth login' first.")]
    NotAuthenticated,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Job {job_id} failed: {message}")]
    JobFailed { job_id: String, message: String },

    #[error("Job {job_id} still processing after {attempts} status checks")]
    JobTimedOut { job_id: String, attempts: u32 },

    #[error("Job {0} was cancelled")]
    JobCancelled(String),
}

pub type Result<T> = std::result::Result<T, ZyntraError>;

impl ZyntraError {
    /// Create an authentication error from a message
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a configuration error from a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid response error from a message
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an invalid parameter error from a message
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Message suitable for an inline status banner.
    ///
    /// Transport failures collapse to a generic retry hint, authentication
    /// failures keep the server-provided detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error. Please try again.".to_string(),
            Self::Authentication(detail) => detail.clone(),
            Self::JobTimedOut { .. } => {
                "Processing timeout. Please check status later.".to_string()
            }
            Self::JobCancelled(_) => "Processing stopped by user".to_string(),
            Self::JobFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
