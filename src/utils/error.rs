use thiserror::Error;

#[derive(Error, Debug)]
pub enum AstroError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No async runtime available: {message}")]
    RuntimeUnavailable { message: String },
}

/// Coarse grouping used for logging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Timeout,
    MalformedPayload,
    Configuration,
    Io,
    Runtime,
}

impl AstroError {
    pub fn malformed(message: impl Into<String>) -> Self {
        AstroError::MalformedPayload {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AstroError::ApiError(e) if e.is_timeout() => ErrorCategory::Timeout,
            AstroError::ApiError(e) if e.is_decode() => ErrorCategory::MalformedPayload,
            AstroError::ApiError(_) | AstroError::HttpStatus { .. } => ErrorCategory::Network,
            AstroError::MalformedPayload { .. } => ErrorCategory::MalformedPayload,
            AstroError::IoError(_) => ErrorCategory::Io,
            AstroError::ConfigError { .. } | AstroError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            AstroError::RuntimeUnavailable { .. } => ErrorCategory::Runtime,
        }
    }

    /// Fetch failures never reach the presentation layer; the controller swaps in a fallback.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Timeout | ErrorCategory::MalformedPayload
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the configured endpoints",
            ErrorCategory::Timeout => "Raise refresh.request_timeout_seconds or try again later",
            ErrorCategory::MalformedPayload => "The upstream API may have changed its response shape",
            ErrorCategory::Configuration => "Fix the configuration file and run again",
            ErrorCategory::Io => "Check that the file exists and is readable",
            ErrorCategory::Runtime => "Call from inside a tokio runtime",
        }
    }
}

pub type Result<T> = std::result::Result<T, AstroError>;
