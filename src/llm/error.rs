//! Text-generation error types

use thiserror::Error;

/// Errors that can occur while talking to the text-generation service. All of them end the run.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not found. Set the {0} environment variable.")]
    MissingApiKey(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Authentication and quota problems need the user to act, everything else is transient.
    pub fn is_auth_or_quota(&self) -> bool {
        match self {
            LlmError::MissingApiKey(_) => true,
            LlmError::ApiError { status, .. } => matches!(status, 401 | 403 | 429),
            LlmError::Network(_) | LlmError::InvalidResponse(_) | LlmError::Json(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth_or_quota() {
        assert!(LlmError::MissingApiKey("OPENAI_API_KEY".into()).is_auth_or_quota());
        assert!(
            LlmError::ApiError {
                status: 401,
                message: "Unauthorized".into()
            }
            .is_auth_or_quota()
        );
        assert!(
            LlmError::ApiError {
                status: 429,
                message: "quota".into()
            }
            .is_auth_or_quota()
        );
        assert!(
            !LlmError::ApiError {
                status: 500,
                message: "Server error".into()
            }
            .is_auth_or_quota()
        );
        assert!(!LlmError::InvalidResponse("no choices".into()).is_auth_or_quota());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            LlmError::MissingApiKey("MY_KEY".into()).to_string(),
            "API key not found. Set the MY_KEY environment variable."
        );
        assert_eq!(
            LlmError::ApiError {
                status: 400,
                message: "bad".into()
            }
            .to_string(),
            "API error 400: bad"
        );
    }
}
