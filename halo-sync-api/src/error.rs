use serde::{Deserialize, Serialize};

/// Unified error type for all Halo post API operations.
///
/// All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — the server asked us to slow down
///
/// The built-in HTTP client retries these for read-only requests only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (name resolution or connection refused).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// HTTP 429 from the blog.
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided.
        retry_after: Option<u64>,
    },

    /// The server answered with a non-success status and no usable envelope.
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw (truncated) response body.
        body: String,
    },

    /// The server answered with an error envelope (`{ status, message, devMessage }`).
    Api {
        /// Status reported in the envelope.
        status: i32,
        /// User facing message from the blog.
        message: String,
        /// Developer message, if the blog sent one.
        dev_message: Option<String>,
    },

    /// Failed to parse the response body.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// A request parameter is invalid (blank blog url, etc.).
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },
}

impl ApiError {
    /// Whether the failure is transient and the request may be repeated.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Message suitable for showing to the user.
    ///
    /// For envelope errors this is the blog's own message, which is what the
    /// user expects to see after a rejected publish or update.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "[halo] Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "[halo] Request timeout: {detail}"),
            Self::RateLimited { retry_after } => {
                if let Some(secs) = retry_after {
                    write!(f, "[halo] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[halo] Rate limited")
                }
            }
            Self::Http { status, body } => {
                if body.is_empty() {
                    write!(f, "[halo] HTTP {status}")
                } else {
                    write!(f, "[halo] HTTP {status}: {body}")
                }
            }
            Self::Api {
                status, message, ..
            } => write!(f, "[halo] {message} (status {status})"),
            Self::ParseError { detail } => write!(f, "[halo] Parse error: {detail}"),
            Self::InvalidParameter { param, detail } => {
                write!(f, "[halo] Invalid parameter '{param}': {detail}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
