use thiserror::Error;

/// Failure of a single outbound attempt. Always recovered by the retry
/// controller; never escapes a dispatch run.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP {status} {status_text}")]
    HttpStatus { status: u16, status_text: String },

    #[error("failed to decode response body: {0}")]
    Parse(String),

    #[error("network error: {0}")]
    Network(String),
}

impl AttemptError {
    /// Short classification tag for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::HttpStatus { .. } => "status",
            Self::Parse(_) => "decode",
            Self::Network(_) => "network",
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = AttemptError::HttpStatus {
            status: 502,
            status_text: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");
        assert_eq!(err.kind(), "status");
    }

    #[test]
    fn test_timeout_display() {
        let err = AttemptError::Timeout(60);
        assert_eq!(err.to_string(), "request timed out after 60s");
        assert_eq!(err.kind(), "timeout");
    }
}
