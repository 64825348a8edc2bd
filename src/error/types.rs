//! Core error types.

use thiserror::Error;

/// Coarse error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Client,
    Server,
    Network,
    Parsing,
    Validation,
    Configuration,
    Protocol,
    Unknown,
}

/// Errors produced by the OpenRouter adapter.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Transport-level failure (connection reset, TLS, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Request timed out: {0}")]
    TimeoutError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Stream error: {0}")]
    StreamError(String),

    /// A vendor-reported failure, either a non-2xx status or a 200 envelope
    /// carrying an `error` object.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("{provider} error: {message}")]
    ProviderError {
        provider: String,
        message: String,
        error_code: Option<String>,
    },

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceededError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// The vendor broke its documented wire contract (e.g. a tool call delta
    /// without id or function name on first appearance).
    #[error("Invalid response data: {message}")]
    InvalidResponseData {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// A complete response contained no choices.
    #[error("No content generated: {0}")]
    NoContentGenerated(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LlmError {
    /// Create an API error without details.
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a protocol violation error carrying the offending payload.
    pub fn invalid_response_data(
        message: impl Into<String>,
        data: Option<serde_json::Value>,
    ) -> Self {
        Self::InvalidResponseData {
            message: message.into(),
            data,
        }
    }

    /// HTTP status code, when the error originated from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::AuthenticationError(_) => Some(401),
            Self::RateLimitError(_) => Some(429),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AuthenticationError(_) | Self::MissingApiKey(_) => ErrorCategory::Authentication,
            Self::RateLimitError(_) | Self::QuotaExceededError(_) => ErrorCategory::RateLimit,
            Self::ApiError { code, .. } if *code >= 500 => ErrorCategory::Server,
            Self::ApiError { code, .. } if *code >= 400 => ErrorCategory::Client,
            Self::InvalidInput(_) | Self::NotFound(_) => ErrorCategory::Client,
            Self::HttpError(_) | Self::TimeoutError(_) | Self::StreamError(_) => {
                ErrorCategory::Network
            }
            Self::JsonError(_) | Self::ParseError(_) => ErrorCategory::Parsing,
            Self::InvalidParameter(_) => ErrorCategory::Validation,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::InvalidResponseData { .. } | Self::NoContentGenerated(_) => {
                ErrorCategory::Protocol
            }
            _ => ErrorCategory::Unknown,
        }
    }

    /// Whether a caller-side retry could reasonably succeed.
    ///
    /// This crate never retries on its own; the flag is advisory for the
    /// transport layer.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Server | ErrorCategory::Network
        ) && !matches!(self, Self::QuotaExceededError(_))
    }
}
