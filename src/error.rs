use thiserror::Error;

/// Normalized error taxonomy for prompt generation and image description.
///
/// Every gateway failure is mapped to one of these variants at the call
/// boundary; the `Display` text is the user-facing message. Diagnostic detail
/// from the provider is preserved inside `UpstreamError`, while
/// `InvalidCredential` deliberately substitutes a friendlier message for the
/// raw provider string.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No API key is configured. Enter your Google AI key or set GOOGLE_API_KEY.")]
    MissingCredential,

    #[error("The provider rejected the API key. Please check your key and try again.")]
    InvalidCredential,

    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),

    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,

    #[error("Provider error: {0}")]
    UpstreamError(String),

    #[error("Something went wrong. Please try again.")]
    UnknownError(String),
}

impl GenerationError {
    /// Diagnostic detail that should go to logs, not to the user.
    pub fn detail(&self) -> Option<&str> {
        match self {
            GenerationError::UpstreamError(detail) | GenerationError::UnknownError(detail) => {
                Some(detail)
            }
            GenerationError::InvalidImageFormat(detail) => Some(detail),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_error_displays_generic_retry_message() {
        let error = GenerationError::UnknownError("connection reset by peer".to_string());
        let message = error.to_string();
        assert!(!message.contains("connection reset"));
        assert!(message.contains("try again"));
        assert_eq!(error.detail(), Some("connection reset by peer"));
    }

    #[test]
    fn invalid_credential_hides_provider_text() {
        let message = GenerationError::InvalidCredential.to_string();
        assert!(message.to_lowercase().contains("check your key"));
    }
}
